//! Integration tests for the evaluator, plotter and output contract
//!
//! Covers the documented scenarios end to end through the public API:
//! caching, NaN policies, placeholder figures, persistence of results.

use approx::assert_relative_eq;
use metrica::io::{load_metrics, FileSaver, MetricsFormat, SaveConfig, Saver};
use metrica::{
    accuracy, confusion_matrix_metrics, precision, AnalysisConfig, Error, Evaluator,
    LabelTypeSpec, MetricOptions, MetricsConfig, NanPolicy, Output, State, Table, Task, Values,
};
use tempfile::TempDir;

fn v(values: &[f64]) -> Values {
    Values::vector(values.to_vec())
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn scenario_perfect_binary_accuracy() {
    let y = v(&[1.0, 0.0, 0.0, 1.0, 1.0]);
    let m = accuracy(&y, &y, &MetricOptions::default()).unwrap();
    assert_eq!(
        m.keys().collect::<Vec<_>>(),
        vec!["accuracy", "count", "count_correct", "count_incorrect", "error"]
    );
    assert_eq!(m.scalar("accuracy"), Some(1.0));
    assert_eq!(m.scalar("count"), Some(5.0));
    assert_eq!(m.scalar("count_correct"), Some(5.0));
    assert_eq!(m.scalar("count_incorrect"), Some(0.0));
    assert_eq!(m.scalar("error"), Some(0.0));
}

#[test]
fn scenario_empty_accuracy() {
    let m = accuracy(&v(&[]), &v(&[]), &MetricOptions::default()).unwrap();
    assert!(m.scalar("accuracy").unwrap().is_nan());
    assert!(m.scalar("error").unwrap().is_nan());
    assert_eq!(m.scalar("count"), Some(0.0));
}

#[test]
fn scenario_binary_confusion_matrix() {
    let y = v(&[1.0, 0.0, 0.0, 1.0, 1.0]);
    let options = MetricOptions::default().with_label_type(LabelTypeSpec::Binary);
    let m = confusion_matrix_metrics(&y, &y, &options).unwrap();
    let cm = m.matrix("confusion_matrix").unwrap();
    assert_eq!(cm, &ndarray::arr2(&[[2.0, 0.0], [0.0, 3.0]]));
    assert_eq!(m.scalar("true_positive"), Some(3.0));
    assert_eq!(m.scalar("false_positive"), Some(0.0));
}

#[test]
fn scenario_perfect_multiclass_precision() {
    let y = v(&[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
    let m = precision(&y, &y, &MetricOptions::default()).unwrap();
    assert_eq!(m.vector("precision").unwrap().to_vec(), vec![1.0, 1.0, 1.0]);
    for key in ["precision_macro", "precision_micro", "precision_weighted"] {
        assert_eq!(m.scalar(key), Some(1.0), "{key}");
    }
}

#[test]
fn scenario_evaluator_omits_nan_rows() {
    let config = AnalysisConfig::default()
        .with_options(MetricOptions::default().with_nan_policy(NanPolicy::Omit));
    let state = State::pair(
        v(&[1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0]),
        v(&[1.5, f64::NAN, 3.0, 4.0, 5.5, 6.0]),
        Task::Regression,
        config,
    )
    .unwrap();
    let m = Evaluator::new(state).evaluate("", "").unwrap();
    assert_eq!(m.scalar("count"), Some(4.0));
    assert_relative_eq!(m.scalar("mean_absolute_error").unwrap(), 0.25);
}

// =============================================================================
// Caching contract
// =============================================================================

#[test]
fn evaluate_is_idempotent_for_every_task() {
    let pairs = [
        (Task::Classification, v(&[0.0, 1.0, 2.0, 1.0]), v(&[0.0, 2.0, 2.0, 1.0])),
        (Task::Scores, v(&[0.0, 1.0, 1.0, 0.0]), v(&[0.2, 0.9, 0.6, 0.4])),
        (Task::Regression, v(&[1.0, 2.0, 3.0]), v(&[1.1, 1.9, 3.2])),
        (Task::Correlation, v(&[1.0, 2.0, 3.0, 4.0]), v(&[2.0, 1.0, 4.0, 3.0])),
    ];
    for (task, y_true, y_pred) in pairs {
        let state = State::pair(y_true, y_pred, task, AnalysisConfig::default()).unwrap();
        let mut evaluator = Evaluator::new(state);
        let first = evaluator.evaluate("", "").unwrap();
        let second = evaluator.evaluate("a/", "/b").unwrap();
        assert!(second.strip_affixes("a/", "/b").equal(&first, true), "{task}");
        assert_eq!(evaluator.computations(), 1, "{task}");
    }
}

#[test]
fn propagate_keeps_keys_and_poisons_values() {
    let state = State::pair(
        v(&[1.0, 0.0, f64::NAN, 1.0]),
        v(&[1.0, 0.0, 1.0, 1.0]),
        Task::Classification,
        AnalysisConfig::default(),
    )
    .unwrap();
    let m = Evaluator::new(state).evaluate("", "").unwrap();
    assert_eq!(m.scalar("count"), Some(4.0));
    assert!(m.scalar("accuracy").unwrap().is_nan());
    assert!(m.matrix("confusion_matrix").unwrap().iter().all(|x| x.is_nan()));
}

#[test]
fn config_errors_surface_before_data() {
    let doc = MetricsConfig::from_yaml_str("nan_policy: drop\n").unwrap();
    let err = State::from_config(Table::new(), Task::Summary, &doc).unwrap_err();
    assert!(matches!(err, Error::InvalidNanPolicy(ref p) if p == "drop"));

    let config = MetricsConfig {
        beta: -1.0,
        ..MetricsConfig::default()
    };
    let err = State::from_config(Table::new(), Task::Summary, &config).unwrap_err();
    assert!(err.is_config_error());
}

// =============================================================================
// Output composition
// =============================================================================

#[test]
fn output_lazy_and_eager_agree() {
    let state = State::pair(
        v(&[1.0, 0.0, 1.0, 1.0]),
        v(&[1.0, 0.0, 0.0, 1.0]),
        Task::Classification,
        AnalysisConfig::default(),
    )
    .unwrap();
    let output = Output::with_builtin_backends(state);

    let lazy = output.get_evaluator(true).unwrap();
    assert!(lazy.is_lazy());
    let eager = output.get_evaluator(false).unwrap();
    assert!(lazy.force().unwrap().equal(eager.ready().unwrap(), true));
}

#[test]
fn empty_table_plots_placeholder() {
    let state = State::table(
        Table::new().with_column("x", Vec::<f64>::new()).unwrap(),
        AnalysisConfig::default(),
    )
    .unwrap();
    let output = Output::with_builtin_backends(state);
    let figures = output.get_plotter(false).unwrap().force().unwrap();
    assert!(figures.get("placeholder").unwrap().spec.is_placeholder());

    let content = output.get_content_generator(false).unwrap().force().unwrap();
    assert!(content.html.contains("no rows to plot"));
}

#[test]
fn saved_results_load_back() {
    let dir = TempDir::new().unwrap();
    let state = State::pair(
        v(&[0.0, 1.0, 1.0, 0.0]),
        v(&[0.1, 0.8, 0.3, 0.5]),
        Task::Scores,
        AnalysisConfig::default(),
    )
    .unwrap();
    let metrics = Evaluator::new(state).evaluate("test_", "").unwrap();

    let saver = FileSaver::new(dir.path(), SaveConfig::new(MetricsFormat::Json));
    let path = saver.save("scores", &metrics).unwrap();
    let loaded = load_metrics(path).unwrap();
    assert!(loaded.equal(&metrics, true));
    assert_relative_eq!(loaded.scalar("test_roc_auc").unwrap(), 0.75);
}
