//! Tests for the cached evaluator

use super::*;
use crate::config::{AnalysisConfig, MetricOptions};
use crate::data::{Table, Values};
use crate::error::Error;
use crate::policy::NanPolicy;
use crate::state::{State, Task};
use approx::assert_relative_eq;

fn state(y_true: Vec<f64>, y_pred: Vec<f64>, task: Task, options: MetricOptions) -> State {
    State::pair(
        Values::vector(y_true),
        Values::vector(y_pred),
        task,
        AnalysisConfig::default().with_options(options),
    )
    .unwrap()
}

fn classification() -> Evaluator {
    Evaluator::new(state(
        vec![1.0, 0.0, 0.0, 1.0, 1.0],
        vec![1.0, 0.0, 1.0, 1.0, 0.0],
        Task::Classification,
        MetricOptions::default(),
    ))
}

#[test]
fn test_evaluate_computes_once() {
    let mut evaluator = classification();
    assert!(!evaluator.is_computed());

    let first = evaluator.evaluate("", "").unwrap();
    let second = evaluator.evaluate("val_", "").unwrap();
    assert_eq!(evaluator.computations(), 1);
    assert!(evaluator.is_computed());

    assert!(second.strip_affixes("val_", "").equal(&first, true));
    assert_relative_eq!(first.scalar("accuracy").unwrap(), 0.6);
}

#[test]
fn test_returned_map_is_a_copy() {
    let mut evaluator = classification();
    let mut first = evaluator.evaluate("", "").unwrap();
    first.insert("accuracy", 0.0);
    first.remove("count");

    let second = evaluator.evaluate("", "").unwrap();
    assert_relative_eq!(second.scalar("accuracy").unwrap(), 0.6);
    assert!(second.contains_key("count"));
}

#[test]
fn test_classification_families() {
    let map = classification().evaluate("", "").unwrap();
    for key in [
        "accuracy",
        "precision",
        "recall",
        "fbeta",
        "jaccard",
        "confusion_matrix",
        "balanced_accuracy",
        "matthews_corrcoef",
        "count",
    ] {
        assert!(map.contains_key(key), "missing {key}");
    }
    assert_eq!(map.scalar("count"), Some(5.0));
}

#[test]
fn test_multilabel_skips_single_label_families() {
    let y = Values::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]).unwrap();
    let state = State::pair(y.clone(), y, Task::Classification, AnalysisConfig::default()).unwrap();
    let map = Evaluator::new(state).evaluate("", "").unwrap();
    assert_eq!(map.scalar("accuracy"), Some(1.0));
    assert!(map.contains_key("hamming_loss"));
    assert!(!map.contains_key("matthews_corrcoef"));
}

#[test]
fn test_results_use_configured_affixes() {
    let mut evaluator = Evaluator::new(state(
        vec![1.0, 2.0, 3.0],
        vec![1.0, 2.0, 4.0],
        Task::Regression,
        MetricOptions::default().with_prefix("test/"),
    ));
    let map = evaluator.results().unwrap();
    assert_relative_eq!(map.scalar("test/mean_absolute_error").unwrap(), 1.0 / 3.0);
    assert!(map.contains_key("test/count"));
}

#[test]
fn test_omit_drops_nan_rows() {
    let mut evaluator = Evaluator::new(state(
        vec![1.0, f64::NAN, 0.0, 1.0, 0.0],
        vec![1.0, 1.0, 0.0, f64::NAN, 0.0],
        Task::Classification,
        MetricOptions::default().with_nan_policy(NanPolicy::Omit),
    ));
    let map = evaluator.evaluate("", "").unwrap();
    assert_eq!(map.scalar("count"), Some(3.0));
    assert_eq!(map.scalar("accuracy"), Some(1.0));
}

#[test]
fn test_failure_is_not_cached() {
    let mut evaluator = Evaluator::new(state(
        vec![1.0, f64::NAN],
        vec![1.0, 0.0],
        Task::Regression,
        MetricOptions::default().with_nan_policy(NanPolicy::Raise),
    ));
    for _ in 0..2 {
        let err = evaluator.evaluate("", "").unwrap_err();
        assert!(matches!(err, Error::NanEncountered { array: "y_true" }));
        assert!(!evaluator.is_computed());
    }
    assert_eq!(evaluator.computations(), 0);
}

#[test]
fn test_compute_bypasses_cache() {
    let mut evaluator = classification();
    evaluator.evaluate("", "").unwrap();
    let fresh = evaluator.compute().unwrap();
    assert_eq!(evaluator.computations(), 1);
    assert!(fresh.equal(&evaluator.evaluate("", "").unwrap(), true));
}

#[test]
fn test_scores_correlation_and_summary_tasks() {
    let scores = Evaluator::new(state(
        vec![0.0, 0.0, 1.0, 1.0],
        vec![0.1, 0.4, 0.35, 0.8],
        Task::Scores,
        MetricOptions::default(),
    ))
    .compute()
    .unwrap();
    assert_relative_eq!(scores.scalar("roc_auc").unwrap(), 0.75);
    assert!(scores.contains_key("average_precision"));

    let correlation = Evaluator::new(state(
        vec![1.0, 2.0, 3.0],
        vec![2.0, 4.0, 6.0],
        Task::Correlation,
        MetricOptions::default(),
    ))
    .compute()
    .unwrap();
    assert_relative_eq!(correlation.scalar("pearson").unwrap(), 1.0);
    assert_relative_eq!(correlation.scalar("spearman").unwrap(), 1.0);

    let table = Table::new().with_column("x", vec![1.0, 3.0]).unwrap();
    let summary = Evaluator::new(State::table(table, AnalysisConfig::default()).unwrap())
        .compute()
        .unwrap();
    assert_eq!(summary.scalar("x.mean"), Some(2.0));
}

#[test]
fn test_equality_ignores_cache() {
    let mut a = classification();
    let b = classification();
    a.evaluate("", "").unwrap();
    assert!(a.equal(&b, true));

    let other = Evaluator::new(state(
        vec![1.0, 0.0],
        vec![1.0, 0.0],
        Task::Classification,
        MetricOptions::default(),
    ));
    assert!(!a.equal(&other, true));
}
