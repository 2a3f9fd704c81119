//! Terminal text rendering of figures: braille canvases, bars and grids

use super::figure::{FigureSpec, Series};

const BLOCK_FULL: char = '\u{2588}';
const BRAILLE_BASE: u32 = 0x2800;
/// Dot bits, left column top to bottom then right column
const BRAILLE_DOTS: [u32; 8] = [0x01, 0x02, 0x04, 0x40, 0x08, 0x10, 0x20, 0x80];

/// Character grid where each cell holds 2x4 braille dots.
struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    fn dots_wide(&self) -> usize {
        self.width * 2
    }

    fn dots_high(&self) -> usize {
        self.height * 4
    }

    /// Set the dot at (x, y), y growing downwards.
    fn set(&mut self, x: usize, y: usize) {
        if x >= self.dots_wide() || y >= self.dots_high() {
            return;
        }
        let cell = (y / 4) * self.width + x / 2;
        self.cells[cell] |= BRAILLE_DOTS[(x % 2) * 4 + y % 4];
    }

    fn line(&mut self, from: (usize, usize), to: (usize, usize)) {
        let steps = from.0.abs_diff(to.0).max(from.1.abs_diff(to.1)).max(1);
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let x = from.0 as f64 + (to.0 as f64 - from.0 as f64) * t;
            let y = from.1 as f64 + (to.1 as f64 - from.1 as f64) * t;
            self.set(x.round() as usize, y.round() as usize);
        }
    }

    fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| {
                row.iter()
                    .map(|&code| char::from_u32(BRAILLE_BASE + code).unwrap_or('\u{28FF}'))
                    .collect()
            })
            .collect()
    }
}

/// Finite data range, widened when degenerate.
fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo > hi {
        None
    } else if lo == hi {
        Some((lo - 0.5, hi + 0.5))
    } else {
        Some((lo, hi))
    }
}

/// Maps data coordinates to canvas dots.
struct Axes {
    x: (f64, f64),
    y: (f64, f64),
}

impl Axes {
    fn to_dot(&self, canvas: &Canvas, x: f64, y: f64) -> Option<(usize, usize)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let fx = (x - self.x.0) / (self.x.1 - self.x.0);
        let fy = (y - self.y.0) / (self.y.1 - self.y.0);
        let dx = (fx * (canvas.dots_wide() - 1) as f64).round() as usize;
        let dy = ((1.0 - fy) * (canvas.dots_high() - 1) as f64).round() as usize;
        Some((dx, dy))
    }
}

/// Frame canvas rows with a title and axis ranges.
fn framed(title: &str, axes: &Axes, x_label: &str, y_label: &str, canvas: &Canvas) -> String {
    let mut out = format!("{title}\n");
    out.push_str(&format!("{y_label} [{:.3}, {:.3}]\n", axes.y.0, axes.y.1));
    out.push_str(&format!("┌{}┐\n", "─".repeat(canvas.width)));
    for row in canvas.rows() {
        out.push_str(&format!("│{row}│\n"));
    }
    out.push_str(&format!("└{}┘\n", "─".repeat(canvas.width)));
    out.push_str(&format!("{x_label} [{:.3}, {:.3}]\n", axes.x.0, axes.x.1));
    out
}

fn empty_chart(title: &str) -> String {
    format!("{title}\n(no finite points)\n")
}

pub(crate) fn render_line(
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[Series],
    width: usize,
    height: usize,
) -> String {
    let xs = || series.iter().flat_map(|s| s.x.iter().copied());
    let ys = || series.iter().flat_map(|s| s.y.iter().copied());
    let (Some(x), Some(y)) = (bounds(xs()), bounds(ys())) else {
        return empty_chart(title);
    };
    let axes = Axes { x, y };
    let mut canvas = Canvas::new(width, height);

    for s in series {
        let dots: Vec<Option<(usize, usize)>> = s
            .x
            .iter()
            .zip(&s.y)
            .map(|(&px, &py)| axes.to_dot(&canvas, px, py))
            .collect();
        for pair in dots.windows(2) {
            if let [Some(a), Some(b)] = pair {
                canvas.line(*a, *b);
            }
        }
        if let [Some(only)] = dots.as_slice() {
            canvas.set(only.0, only.1);
        }
    }

    let mut out = framed(title, &axes, x_label, y_label, &canvas);
    let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
    if !names.is_empty() {
        out.push_str(&format!("series: {}\n", names.join(", ")));
    }
    out
}

pub(crate) fn render_scatter(
    title: &str,
    x_label: &str,
    y_label: &str,
    x: &[f64],
    y: &[f64],
    width: usize,
    height: usize,
) -> String {
    let (Some(xb), Some(yb)) = (bounds(x.iter().copied()), bounds(y.iter().copied())) else {
        return empty_chart(title);
    };
    let axes = Axes { x: xb, y: yb };
    let mut canvas = Canvas::new(width, height);
    for (&px, &py) in x.iter().zip(y) {
        if let Some((dx, dy)) = axes.to_dot(&canvas, px, py) {
            canvas.set(dx, dy);
        }
    }
    framed(title, &axes, x_label, y_label, &canvas)
}

pub(crate) fn render_histogram(title: &str, edges: &[f64], counts: &[usize], width: usize) -> String {
    if counts.is_empty() {
        return empty_chart(title);
    }
    let max = counts.iter().copied().max().unwrap_or(0);
    let ranges: Vec<String> = edges
        .windows(2)
        .map(|w| format!("[{:.3}, {:.3})", w[0], w[1]))
        .collect();
    let label_width = ranges.iter().map(String::len).max().unwrap_or(0);

    let mut out = format!("{title}\n");
    for (range, &count) in ranges.iter().zip(counts) {
        let bar_len = if max > 0 {
            ((count as f64 / max as f64) * width as f64).round() as usize
        } else {
            0
        };
        let bar: String = BLOCK_FULL.to_string().repeat(bar_len);
        out.push_str(&format!("{range:label_width$}  {bar:width$}  {count}\n"));
    }
    out
}

pub(crate) fn render_heatmap(
    title: &str,
    row_labels: &[String],
    col_labels: &[String],
    cells: &[Vec<f64>],
) -> String {
    let fmt_cell = |v: f64| {
        if v.is_nan() {
            "nan".to_string()
        } else if v.fract() == 0.0 {
            format!("{v:.0}")
        } else {
            format!("{v:.3}")
        }
    };
    let rendered: Vec<Vec<String>> = cells
        .iter()
        .map(|row| row.iter().copied().map(fmt_cell).collect())
        .collect();
    let cell_width = rendered
        .iter()
        .flatten()
        .chain(col_labels)
        .map(String::len)
        .max()
        .unwrap_or(1);
    let label_width = row_labels.iter().map(String::len).max().unwrap_or(0);

    let mut out = format!("{title}\n{:label_width$}", "");
    for label in col_labels {
        out.push_str(&format!(" {label:>cell_width$}"));
    }
    out.push('\n');
    for (label, row) in row_labels.iter().zip(&rendered) {
        out.push_str(&format!("{label:label_width$}"));
        for cell in row {
            out.push_str(&format!(" {cell:>cell_width$}"));
        }
        out.push('\n');
    }
    out
}

pub(crate) fn render(spec: &FigureSpec, width: usize, height: usize) -> String {
    match spec {
        FigureSpec::Heatmap {
            title,
            row_labels,
            col_labels,
            cells,
        } => render_heatmap(title, row_labels, col_labels, cells),
        FigureSpec::Line {
            title,
            x_label,
            y_label,
            series,
        } => render_line(title, x_label, y_label, series, width, height),
        FigureSpec::Scatter {
            title,
            x_label,
            y_label,
            x,
            y,
        } => render_scatter(title, x_label, y_label, x, y, width, height),
        FigureSpec::Histogram {
            title,
            edges,
            counts,
        } => render_histogram(title, edges, counts, width),
        FigureSpec::Placeholder { title, message } => format!("{title}\n({message})\n"),
    }
}
