//! Figure descriptions for each analysis task

use super::figure::{FigureSpec, Series};
use crate::data::{ArrayPair, Table, Values};
use crate::error::{Error, Result};
use crate::evaluator::require_pair;
use crate::metrics::confusion_matrix_metrics;
use crate::metrics::ranking::{has_both_classes, precision_recall_curve, roc_curve, ScoreColumns};
use crate::policy::{LabelType, NanPolicy};
use crate::state::{State, StateData, Task};

fn placeholder(task: Task) -> Vec<(String, FigureSpec)> {
    vec![(
        "placeholder".to_string(),
        FigureSpec::Placeholder {
            title: format!("{task} figures"),
            message: "no rows to plot".to_string(),
        },
    )]
}

/// Rows a figure can show: the NaN policy applied, then complete rows only.
fn plotted_pair(state: &State) -> Result<ArrayPair> {
    let pair = require_pair(state)?.clone();
    let (pair, _) = state.options().nan_policy.apply(pair)?;
    let rows = pair.complete_rows();
    Ok(pair.select_rows(&rows))
}

fn columns(values: &Values) -> Vec<Vec<f64>> {
    match values {
        Values::Vector(v) => vec![v.to_vec()],
        Values::Matrix(m) => m.columns().into_iter().map(|c| c.to_vec()).collect(),
    }
}

fn class_name(label_type: LabelType, class: f64) -> String {
    match label_type {
        LabelType::Binary => "positive".to_string(),
        LabelType::Multiclass => format!("class {class}"),
        LabelType::Multilabel => format!("label {class}"),
    }
}

fn confusion_heatmap(pair: &ArrayPair, state: &State) -> Result<FigureSpec> {
    let options = state.options().unformatted();
    let label_type = options.label_type.resolve(pair.y_true())?;
    let map = confusion_matrix_metrics(
        pair.y_true(),
        pair.y_pred(),
        &options.with_label_type(label_type),
    )?;
    let matrix = map
        .matrix("confusion_matrix")
        .ok_or_else(|| Error::InvalidInput("confusion matrix missing".into()))?;
    let cells: Vec<Vec<f64>> = matrix.rows().into_iter().map(|r| r.to_vec()).collect();

    let (row_labels, col_labels) = match label_type {
        LabelType::Binary => (vec!["0".into(), "1".into()], vec!["0".into(), "1".into()]),
        LabelType::Multiclass => {
            let labels: Vec<String> = map
                .vector("labels")
                .map(|l| l.iter().map(|v| v.to_string()).collect())
                .unwrap_or_default();
            (labels.clone(), labels)
        }
        LabelType::Multilabel => (
            (0..cells.len()).map(|j| format!("label {j}")).collect(),
            ["tn", "fp", "fn", "tp"].map(String::from).to_vec(),
        ),
    };
    Ok(FigureSpec::Heatmap {
        title: "Confusion matrix (rows: true, columns: predicted)".into(),
        row_labels,
        col_labels,
        cells,
    })
}

fn score_curves(pair: &ArrayPair, state: &State) -> Result<Vec<(String, FigureSpec)>> {
    let label_type = state.options().label_type.resolve(pair.y_true())?;
    let columns = ScoreColumns::from_values(label_type, pair.y_true(), pair.y_pred())?;

    let mut roc = Vec::new();
    let mut pr = Vec::new();
    for ((labels, scores), &class) in columns.labels.iter().zip(&columns.scores).zip(&columns.classes) {
        let name = class_name(label_type, class);
        if !has_both_classes(labels) {
            tracing::warn!(class = %name, "class lacks positives or negatives, curve skipped");
            continue;
        }
        let r = roc_curve(labels, scores)?;
        let p = precision_recall_curve(labels, scores)?;
        roc.push(Series::new(format!("{name} (auc {:.3})", r.auc()), r.fpr, r.tpr));
        pr.push(Series::new(
            format!("{name} (ap {:.3})", p.average_precision()),
            p.recall,
            p.precision,
        ));
    }

    Ok(vec![
        (
            "roc_curve".into(),
            FigureSpec::Line {
                title: "ROC curve".into(),
                x_label: "false positive rate".into(),
                y_label: "true positive rate".into(),
                series: roc,
            },
        ),
        (
            "precision_recall_curve".into(),
            FigureSpec::Line {
                title: "Precision-recall curve".into(),
                x_label: "recall".into(),
                y_label: "precision".into(),
                series: pr,
            },
        ),
    ])
}

fn regression_figures(pair: &ArrayPair, bins: usize) -> Vec<(String, FigureSpec)> {
    let truths = columns(pair.y_true());
    let preds = columns(pair.y_pred());
    let multi = truths.len() > 1;

    let mut figures = Vec::new();
    let mut residuals = Vec::new();
    for (j, (t, p)) in truths.iter().zip(&preds).enumerate() {
        let (name, title) = if multi {
            (format!("prediction_scatter_{j}"), format!("Prediction vs truth (output {j})"))
        } else {
            ("prediction_scatter".to_string(), "Prediction vs truth".to_string())
        };
        figures.push((
            name,
            FigureSpec::Scatter {
                title,
                x_label: "y_true".into(),
                y_label: "y_pred".into(),
                x: t.clone(),
                y: p.clone(),
            },
        ));
        residuals.extend(t.iter().zip(p).map(|(a, b)| b - a));
    }
    figures.push((
        "residual_histogram".into(),
        FigureSpec::histogram("Residuals (y_pred - y_true)", &residuals, bins),
    ));
    figures
}

fn correlation_scatter(pair: &ArrayPair) -> Vec<(String, FigureSpec)> {
    let x = columns(pair.y_true()).concat();
    let y = columns(pair.y_pred()).concat();
    vec![(
        "scatter".into(),
        FigureSpec::Scatter {
            title: "Correlation".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            x,
            y,
        },
    )]
}

fn column_histograms(table: &Table, nan_policy: NanPolicy, bins: usize) -> Result<Vec<(String, FigureSpec)>> {
    let columns: Vec<_> = table.columns().collect();
    let incomplete = |i: usize| columns.iter().any(|(_, c)| c[i].is_nan());
    let rows: Vec<usize> = match nan_policy {
        NanPolicy::Raise if (0..table.n_rows()).any(incomplete) => {
            return Err(Error::NanEncountered { array: "table" })
        }
        NanPolicy::Omit => (0..table.n_rows()).filter(|&i| !incomplete(i)).collect(),
        _ => (0..table.n_rows()).collect(),
    };
    if rows.is_empty() {
        return Ok(placeholder(Task::Summary));
    }
    Ok(columns
        .iter()
        .map(|(name, column)| {
            let values: Vec<f64> = rows.iter().map(|&i| column[i]).collect();
            (
                format!("histogram.{name}"),
                FigureSpec::histogram(format!("Distribution of {name}"), &values, bins),
            )
        })
        .collect())
}

/// Figure descriptions for the task of `state`, in display order.
///
/// Input without rows to show yields a single placeholder figure.
pub(crate) fn figure_specs(state: &State) -> Result<Vec<(String, FigureSpec)>> {
    let bins = state.config().bins;
    if let StateData::Table(table) = state.data() {
        return column_histograms(table, state.options().nan_policy, bins);
    }

    let pair = plotted_pair(state)?;
    if pair.n_rows() == 0 {
        return Ok(placeholder(state.task()));
    }
    match state.task() {
        Task::Classification => Ok(vec![("confusion_matrix".into(), confusion_heatmap(&pair, state)?)]),
        Task::Scores => score_curves(&pair, state),
        Task::Regression => Ok(regression_figures(&pair, bins)),
        Task::Correlation => Ok(correlation_scatter(&pair)),
        Task::Summary => Err(Error::InvalidInput("task 'summary' needs a table".into())),
    }
}
