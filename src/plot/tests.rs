//! Tests for the plotter and per-task figures

use super::*;
use crate::config::{AnalysisConfig, MetricOptions};
use crate::data::{Table, Values};
use crate::error::Error;
use crate::policy::NanPolicy;
use crate::state::{State, Task};

fn pair_state(y_true: Values, y_pred: Values, task: Task, config: AnalysisConfig) -> State {
    State::pair(y_true, y_pred, task, config).unwrap()
}

fn plotter(state: State) -> Plotter {
    Plotter::new(state, &BackendTable::builtin()).unwrap()
}

fn text(figure: &Figure) -> &str {
    match &figure.content {
        FigureContent::Text(text) => text,
        FigureContent::Json(_) => panic!("expected text content"),
    }
}

#[test]
fn test_classification_heatmap() {
    let state = pair_state(
        Values::vector(vec![1.0, 0.0, 0.0, 1.0, 1.0]),
        Values::vector(vec![1.0, 0.0, 0.0, 1.0, 1.0]),
        Task::Classification,
        AnalysisConfig::default(),
    );
    let figures = plotter(state).plot().unwrap();
    assert_eq!(figures.keys().collect::<Vec<_>>(), vec!["confusion_matrix"]);

    let figure = figures.get("confusion_matrix").unwrap();
    let FigureSpec::Heatmap { cells, .. } = &figure.spec else {
        panic!("expected heatmap");
    };
    assert_eq!(cells, &vec![vec![2.0, 0.0], vec![0.0, 3.0]]);
    assert_eq!(figure.backend, "text");
    assert!(text(figure).starts_with("Confusion matrix"));
}

#[test]
fn test_multiclass_heatmap_labels() {
    let state = pair_state(
        Values::vector(vec![0.0, 1.0, 2.0, 2.0]),
        Values::vector(vec![0.0, 2.0, 2.0, 1.0]),
        Task::Classification,
        AnalysisConfig::default(),
    );
    let figures = plotter(state).compute().unwrap();
    let FigureSpec::Heatmap { row_labels, cells, .. } = &figures.get("confusion_matrix").unwrap().spec
    else {
        panic!("expected heatmap");
    };
    assert_eq!(row_labels, &vec!["0".to_string(), "1".into(), "2".into()]);
    assert_eq!(cells[2], vec![0.0, 1.0, 1.0]);
}

#[test]
fn test_score_curves() {
    let state = pair_state(
        Values::vector(vec![0.0, 0.0, 1.0, 1.0]),
        Values::vector(vec![0.1, 0.4, 0.35, 0.8]),
        Task::Scores,
        AnalysisConfig::default().with_figure_backend("json"),
    );
    let figures = plotter(state).plot().unwrap();
    assert_eq!(
        figures.keys().collect::<Vec<_>>(),
        vec!["roc_curve", "precision_recall_curve"]
    );

    let roc = figures.get("roc_curve").unwrap();
    let FigureSpec::Line { series, .. } = &roc.spec else {
        panic!("expected line");
    };
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].name, "positive (auc 0.750)");
    assert_eq!(series[0].x, vec![0.0, 0.0, 0.5, 0.5, 1.0]);

    let FigureContent::Json(value) = &roc.content else {
        panic!("expected json");
    };
    assert_eq!(value["kind"], "line");
}

#[test]
fn test_single_class_scores_have_no_series() {
    let state = pair_state(
        Values::vector(vec![1.0, 1.0]),
        Values::vector(vec![0.2, 0.9]),
        Task::Scores,
        AnalysisConfig::default().with_options(
            MetricOptions::default().with_label_type(crate::policy::LabelTypeSpec::Binary),
        ),
    );
    let figures = plotter(state).plot().unwrap();
    let FigureSpec::Line { series, .. } = &figures.get("roc_curve").unwrap().spec else {
        panic!("expected line");
    };
    assert!(series.is_empty());
}

#[test]
fn test_regression_scatter_and_residuals() {
    let state = pair_state(
        Values::vector(vec![1.0, 2.0, 3.0, 4.0]),
        Values::vector(vec![1.5, 2.0, 2.5, 4.0]),
        Task::Regression,
        AnalysisConfig::default().with_bins(2),
    );
    let figures = plotter(state).plot().unwrap();
    assert_eq!(
        figures.keys().collect::<Vec<_>>(),
        vec!["prediction_scatter", "residual_histogram"]
    );
    let FigureSpec::Histogram { edges, counts, .. } =
        &figures.get("residual_histogram").unwrap().spec
    else {
        panic!("expected histogram");
    };
    // Residuals 0.5, 0, -0.5, 0 over [-0.5, 0.5]
    assert_eq!(edges, &vec![-0.5, 0.0, 0.5]);
    assert_eq!(counts, &vec![1, 3]);
}

#[test]
fn test_multi_output_regression() {
    let y = Values::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let state = pair_state(y.clone(), y, Task::Regression, AnalysisConfig::default());
    let figures = plotter(state).plot().unwrap();
    assert!(figures.get("prediction_scatter_0").is_some());
    assert!(figures.get("prediction_scatter_1").is_some());
    assert_eq!(figures.len(), 3);
}

#[test]
fn test_correlation_scatter() {
    let state = pair_state(
        Values::vector(vec![1.0, 2.0, f64::NAN]),
        Values::vector(vec![2.0, 4.0, 6.0]),
        Task::Correlation,
        AnalysisConfig::default(),
    );
    let figures = plotter(state).plot().unwrap();
    let FigureSpec::Scatter { x, .. } = &figures.get("scatter").unwrap().spec else {
        panic!("expected scatter");
    };
    // Incomplete rows are never drawn
    assert_eq!(x, &vec![1.0, 2.0]);
}

#[test]
fn test_summary_histograms() {
    let table = Table::new()
        .with_column("a", vec![1.0, 2.0, 3.0])
        .unwrap()
        .with_column("b", vec![5.0, f64::NAN, 5.0])
        .unwrap();
    let state = State::table(table, AnalysisConfig::default().with_bins(3)).unwrap();
    let figures = plotter(state).plot().unwrap();
    assert_eq!(
        figures.keys().collect::<Vec<_>>(),
        vec!["histogram.a", "histogram.b"]
    );
    let FigureSpec::Histogram { counts, .. } = &figures.get("histogram.b").unwrap().spec else {
        panic!("expected histogram");
    };
    assert_eq!(counts.iter().sum::<usize>(), 2);
}

#[test]
fn test_zero_rows_give_placeholder() {
    let state = pair_state(
        Values::vector(vec![]),
        Values::vector(vec![]),
        Task::Regression,
        AnalysisConfig::default(),
    );
    let figures = plotter(state).plot().unwrap();
    assert_eq!(figures.len(), 1);
    let figure = figures.get("placeholder").unwrap();
    assert!(figure.spec.is_placeholder());
    assert!(text(figure).contains("no rows to plot"));

    let all_nan = pair_state(
        Values::vector(vec![f64::NAN]),
        Values::vector(vec![1.0]),
        Task::Classification,
        AnalysisConfig::default(),
    );
    assert!(plotter(all_nan).plot().unwrap().get("placeholder").is_some());
}

#[test]
fn test_plot_caches_and_copies() {
    let state = pair_state(
        Values::vector(vec![1.0, 2.0]),
        Values::vector(vec![1.0, 3.0]),
        Task::Correlation,
        AnalysisConfig::default(),
    );
    let mut plotter = plotter(state);
    let first = plotter.plot().unwrap();
    let second = plotter.plot().unwrap();
    assert_eq!(first, second);
    assert_eq!(plotter.computations(), 1);
    assert!(plotter.is_computed());
}

#[test]
fn test_raise_is_not_cached() {
    let config = AnalysisConfig::default()
        .with_options(MetricOptions::default().with_nan_policy(NanPolicy::Raise));
    let state = pair_state(
        Values::vector(vec![1.0, 2.0]),
        Values::vector(vec![f64::NAN, 3.0]),
        Task::Regression,
        config,
    );
    let mut plotter = plotter(state);
    let err = plotter.plot().unwrap_err();
    assert!(matches!(err, Error::NanEncountered { array: "y_pred" }));
    assert!(!plotter.is_computed());
}

#[test]
fn test_unknown_backend_fails_at_construction() {
    let state = pair_state(
        Values::vector(vec![1.0]),
        Values::vector(vec![1.0]),
        Task::Regression,
        AnalysisConfig::default().with_figure_backend("svg"),
    );
    let err = Plotter::new(state, &BackendTable::builtin()).unwrap_err();
    assert!(matches!(err, Error::UnknownBackend(_)));
}

#[test]
fn test_equality_includes_backend() {
    let make = |backend: &str| {
        plotter(pair_state(
            Values::vector(vec![1.0, 2.0]),
            Values::vector(vec![1.0, 2.0]),
            Task::Correlation,
            AnalysisConfig::default().with_figure_backend(backend),
        ))
    };
    let mut a = make("text");
    a.plot().unwrap();
    assert!(a.equal(&make("text"), false));
    assert!(!a.equal(&make("json"), false));
}

#[test]
fn test_histogram_spec_edges() {
    let FigureSpec::Histogram { edges, counts, .. } =
        FigureSpec::histogram("h", &[2.0, 2.0, f64::NAN], 2)
    else {
        panic!("expected histogram");
    };
    assert_eq!(edges, vec![1.5, 2.0, 2.5]);
    assert_eq!(counts, vec![0, 2]);
}
