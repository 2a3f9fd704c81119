//! Figure descriptions and rendered figures

use serde::{Deserialize, Serialize};

/// One named series of a line chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }
}

/// Backend-independent description of a figure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FigureSpec {
    /// Annotated grid, e.g. a confusion matrix
    Heatmap {
        title: String,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
        cells: Vec<Vec<f64>>,
    },
    Line {
        title: String,
        x_label: String,
        y_label: String,
        series: Vec<Series>,
    },
    Scatter {
        title: String,
        x_label: String,
        y_label: String,
        x: Vec<f64>,
        y: Vec<f64>,
    },
    /// `edges` has one more entry than `counts`
    Histogram {
        title: String,
        edges: Vec<f64>,
        counts: Vec<usize>,
    },
    /// Stands in for a figure that has no data to show
    Placeholder { title: String, message: String },
}

impl FigureSpec {
    pub fn title(&self) -> &str {
        match self {
            Self::Heatmap { title, .. }
            | Self::Line { title, .. }
            | Self::Scatter { title, .. }
            | Self::Histogram { title, .. }
            | Self::Placeholder { title, .. } => title,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Heatmap { .. } => "heatmap",
            Self::Line { .. } => "line",
            Self::Scatter { .. } => "scatter",
            Self::Histogram { .. } => "histogram",
            Self::Placeholder { .. } => "placeholder",
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Histogram of the finite `values` over `bins` equal-width bins.
    ///
    /// A constant sample spans `value - 0.5 .. value + 0.5`. No finite values
    /// give an empty histogram.
    pub fn histogram(title: impl Into<String>, values: &[f64], bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let title = title.into();
        if finite.is_empty() || bins == 0 {
            return Self::Histogram {
                title,
                edges: Vec::new(),
                counts: Vec::new(),
            };
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for v in finite {
            // The last bin is closed on the right
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Self::Histogram {
            title,
            edges,
            counts,
        }
    }
}

/// Rendered figure payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureContent {
    Text(String),
    Json(serde_json::Value),
}

/// A figure description together with its rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub spec: FigureSpec,
    /// Name of the backend that rendered `content`
    pub backend: String,
    pub content: FigureContent,
}

/// Insertion-ordered `name -> Figure` mapping.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureMap {
    entries: Vec<(String, Figure)>,
}

impl FigureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, keeping the position of an existing name.
    pub fn insert(&mut self, name: impl Into<String>, figure: Figure) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = figure,
            None => self.entries.push((name, figure)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Figure> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Figure)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), f))
    }
}
