//! Tests for classification metrics

use super::*;
use crate::config::MetricOptions;
use crate::data::Values;
use crate::error::Error;
use crate::policy::{LabelTypeSpec, NanPolicy};
use approx::assert_relative_eq;

fn v(values: &[f64]) -> Values {
    Values::vector(values.to_vec())
}

fn m(rows: &[Vec<f64>]) -> Values {
    Values::from_rows(rows).unwrap()
}

fn opts() -> MetricOptions {
    MetricOptions::default()
}

#[test]
fn test_confusion_matrix_basic() {
    let y_true = [0.0, 1.0, 0.0, 2.0, 0.0, 2.0];
    let y_pred = [0.0, 1.0, 1.0, 2.0, 0.0, 1.0];
    let cm = ConfusionMatrix::from_predictions(&y_true, &y_pred);

    assert_eq!(cm.n_classes(), 3);
    assert_eq!(cm.get(0, 0), 2); // True 0, predicted 0
    assert_eq!(cm.get(0, 1), 1); // True 0, predicted 1
    assert_eq!(cm.get(1, 1), 1);
    assert_eq!(cm.get(2, 1), 1);
    assert_eq!(cm.get(2, 2), 1);
    assert_eq!(cm.total(), 6);
}

#[test]
fn test_confusion_matrix_tp_fp_fn() {
    let y_true = [1.0, 0.0, 0.0, 1.0];
    let y_pred = [1.0, 1.0, 0.0, 1.0];
    let cm = ConfusionMatrix::from_predictions(&y_true, &y_pred);

    // Class 1 sits at index 1
    assert_eq!(cm.true_positives(1), 2);
    assert_eq!(cm.false_positives(1), 1);
    assert_eq!(cm.false_negatives(1), 0);
    assert_eq!(cm.true_negatives(1), 1);

    assert_eq!(cm.true_positives(0), 1);
    assert_eq!(cm.false_positives(0), 0);
    assert_eq!(cm.false_negatives(0), 1);
}

#[test]
fn test_confusion_matrix_labels_are_sorted_union() {
    let cm = ConfusionMatrix::from_predictions(&[3.0, 1.0], &[1.0, 7.0]);
    assert_eq!(cm.labels(), &[1.0, 3.0, 7.0]);
    assert_eq!(cm.support(2), 0);
}

#[test]
fn test_confusion_matrix_empty_accuracy_is_nan() {
    let cm = ConfusionMatrix::from_predictions(&[], &[]);
    assert_eq!(cm.n_classes(), 0);
    assert!(cm.accuracy().is_nan());
}

#[test]
fn test_confusion_matrix_display() {
    let cm = ConfusionMatrix::from_predictions(&[0.0, 1.0], &[0.0, 1.0]);
    let display = format!("{cm}");
    assert!(display.contains("Confusion Matrix"));
}

#[test]
fn test_accuracy_perfect_binary() {
    let y = v(&[1.0, 0.0, 0.0, 1.0, 1.0]);
    let result = accuracy(&y, &y, &opts()).unwrap();

    assert_eq!(result.scalar("accuracy"), Some(1.0));
    assert_eq!(result.scalar("count"), Some(5.0));
    assert_eq!(result.scalar("count_correct"), Some(5.0));
    assert_eq!(result.scalar("count_incorrect"), Some(0.0));
    assert_eq!(result.scalar("error"), Some(0.0));
    let keys: Vec<&str> = result.keys().collect();
    assert_eq!(
        keys,
        vec!["accuracy", "count", "count_correct", "count_incorrect", "error"]
    );
}

#[test]
fn test_accuracy_empty_input() {
    let result = accuracy(&v(&[]), &v(&[]), &opts()).unwrap();
    assert!(result.scalar("accuracy").unwrap().is_nan());
    assert!(result.scalar("error").unwrap().is_nan());
    assert_eq!(result.scalar("count"), Some(0.0));
    assert_eq!(result.scalar("count_correct"), Some(0.0));
}

#[test]
fn test_accuracy_partial() {
    let result = accuracy(&v(&[0.0, 1.0, 2.0, 2.0]), &v(&[0.0, 1.0, 1.0, 2.0]), &opts()).unwrap();
    assert_relative_eq!(result.scalar("accuracy").unwrap(), 0.75);
    assert_relative_eq!(result.scalar("error").unwrap(), 0.25);
    assert_eq!(result.scalar("count_incorrect"), Some(1.0));
}

#[test]
fn test_accuracy_propagate_nan() {
    let y_true = v(&[1.0, 0.0, f64::NAN, 1.0]);
    let y_pred = v(&[1.0, 0.0, 0.0, 1.0]);
    let result = accuracy(&y_true, &y_pred, &opts()).unwrap();

    assert!(result.scalar("accuracy").unwrap().is_nan());
    assert!(result.scalar("count_correct").unwrap().is_nan());
    assert_eq!(result.scalar("count"), Some(4.0));
    assert_eq!(result.len(), 5);
}

#[test]
fn test_accuracy_omit_nan() {
    let y_true = v(&[1.0, 0.0, f64::NAN, 1.0]);
    let y_pred = v(&[1.0, 0.0, 0.0, 0.0]);
    let options = opts().with_nan_policy(NanPolicy::Omit);
    let result = accuracy(&y_true, &y_pred, &options).unwrap();

    assert_relative_eq!(result.scalar("accuracy").unwrap(), 2.0 / 3.0);
    assert_eq!(result.scalar("count"), Some(3.0));
}

#[test]
fn test_accuracy_raise_names_array() {
    let options = opts().with_nan_policy(NanPolicy::Raise);

    let err = accuracy(&v(&[f64::NAN, 1.0]), &v(&[f64::NAN, 1.0]), &options).unwrap_err();
    assert!(matches!(err, Error::NanEncountered { array: "y_true" }));

    let err = accuracy(&v(&[0.0, 1.0]), &v(&[f64::NAN, 1.0]), &options).unwrap_err();
    assert!(matches!(err, Error::NanEncountered { array: "y_pred" }));
}

#[test]
fn test_accuracy_prefix_and_suffix() {
    let y = v(&[1.0, 0.0]);
    let options = opts().with_prefix("val_").with_suffix("_epoch");
    let result = accuracy(&y, &y, &options).unwrap();

    assert_eq!(result.scalar("val_accuracy_epoch"), Some(1.0));
    assert_eq!(result.scalar("val_count_epoch"), Some(2.0));
    assert!(!result.contains_key("accuracy"));
}

#[test]
fn test_accuracy_shape_mismatch() {
    let err = accuracy(&v(&[1.0, 0.0]), &v(&[1.0]), &opts()).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
}

#[test]
fn test_accuracy_rejects_score_matrix() {
    let scores = m(&[vec![0.2, 0.8], vec![0.9, 0.1]]);
    let err = accuracy(&v(&[1.0, 0.0]), &scores, &opts()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_accuracy_multilabel_exact_match_and_hamming() {
    let y_true = m(&[vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]);
    let y_pred = m(&[vec![1.0, 0.0], vec![0.0, 0.0], vec![1.0, 1.0]]);
    let result = accuracy(&y_true, &y_pred, &opts()).unwrap();

    assert_relative_eq!(result.scalar("accuracy").unwrap(), 2.0 / 3.0);
    assert_relative_eq!(result.scalar("hamming_loss").unwrap(), 1.0 / 6.0);
    assert_eq!(result.scalar("count"), Some(3.0));
}

#[test]
fn test_binary_confusion_matrix_metrics() {
    let y = v(&[1.0, 0.0, 0.0, 1.0, 1.0]);
    let options = opts().with_label_type(LabelTypeSpec::Binary);
    let result = confusion_matrix_metrics(&y, &y, &options).unwrap();

    let cm = result.matrix("confusion_matrix").unwrap();
    assert_eq!(cm, &ndarray::arr2(&[[2.0, 0.0], [0.0, 3.0]]));
    assert_eq!(result.scalar("true_positive"), Some(3.0));
    assert_eq!(result.scalar("false_positive"), Some(0.0));
    assert_eq!(result.scalar("true_negative"), Some(2.0));
    assert_eq!(result.scalar("false_negative"), Some(0.0));
    assert_eq!(result.scalar("tpr"), Some(1.0));
    assert_eq!(result.scalar("fpr"), Some(0.0));
    assert_eq!(result.scalar("count"), Some(5.0));
}

#[test]
fn test_binary_rates_undefined_without_positives() {
    let y = v(&[0.0, 0.0, 0.0]);
    let result = confusion_matrix_metrics(&y, &y, &opts()).unwrap();
    assert!(result.scalar("tpr").unwrap().is_nan());
    assert_eq!(result.scalar("tnr"), Some(1.0));
}

#[test]
fn test_multiclass_confusion_matrix_metrics() {
    let y_true = v(&[0.0, 1.0, 2.0, 0.0]);
    let y_pred = v(&[0.0, 2.0, 2.0, 0.0]);
    let result = confusion_matrix_metrics(&y_true, &y_pred, &opts()).unwrap();

    let cm = result.matrix("confusion_matrix").unwrap();
    assert_eq!(cm.dim(), (3, 3));
    assert_eq!(cm[[1, 2]], 1.0);
    assert_eq!(result.vector("labels").unwrap().to_vec(), vec![0.0, 1.0, 2.0]);
    assert_eq!(result.vector("true_positive").unwrap().to_vec(), vec![2.0, 0.0, 1.0]);
    assert_eq!(result.vector("false_positive").unwrap().to_vec(), vec![0.0, 0.0, 1.0]);
}

#[test]
fn test_multilabel_confusion_matrix_metrics() {
    let y_true = m(&[vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]);
    let y_pred = m(&[vec![1.0, 0.0], vec![0.0, 0.0], vec![1.0, 1.0]]);
    let result = confusion_matrix_metrics(&y_true, &y_pred, &opts()).unwrap();

    let cm = result.matrix("confusion_matrix").unwrap();
    assert_eq!(cm.dim(), (2, 4));
    // Columns: tn, fp, fn, tp
    assert_eq!(cm.row(1).to_vec(), vec![1.0, 0.0, 1.0, 1.0]);
    assert!(!result.contains_key("labels"));
}

#[test]
fn test_multiclass_precision_perfect() {
    let y = v(&[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
    let result = precision(&y, &y, &opts()).unwrap();

    assert_eq!(result.vector("precision").unwrap().to_vec(), vec![1.0, 1.0, 1.0]);
    assert_eq!(result.scalar("precision_macro"), Some(1.0));
    assert_eq!(result.scalar("precision_micro"), Some(1.0));
    assert_eq!(result.scalar("precision_weighted"), Some(1.0));
    assert_eq!(result.vector("support").unwrap().to_vec(), vec![2.0, 2.0, 2.0]);
    assert_eq!(result.vector("labels").unwrap().to_vec(), vec![0.0, 1.0, 2.0]);
    assert_eq!(result.scalar("count"), Some(6.0));
}

#[test]
fn test_binary_precision_recall_f1() {
    let y_true = v(&[0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
    let y_pred = v(&[0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);

    // Positive class 1: tp=3, fp=2, fn=1
    let p = precision(&y_true, &y_pred, &opts()).unwrap();
    assert_relative_eq!(p.scalar("precision").unwrap(), 0.6);
    assert_eq!(p.scalar("support"), Some(4.0));
    assert!(!p.contains_key("precision_macro"));

    let r = recall(&y_true, &y_pred, &opts()).unwrap();
    assert_relative_eq!(r.scalar("recall").unwrap(), 0.75);

    let f = f1_score(&y_true, &y_pred, &opts()).unwrap();
    assert_relative_eq!(f.scalar("f1").unwrap(), 2.0 / 3.0, epsilon = 1e-12);

    let f2 = fbeta_score(&y_true, &y_pred, 2.0, &opts()).unwrap();
    assert_relative_eq!(f2.scalar("fbeta").unwrap(), 15.0 / 21.0, epsilon = 1e-12);

    let j = jaccard_score(&y_true, &y_pred, &opts()).unwrap();
    assert_relative_eq!(j.scalar("jaccard").unwrap(), 0.5);
}

#[test]
fn test_fbeta_rejects_non_positive_beta() {
    let y = v(&[0.0, 1.0]);
    for beta in [0.0, -1.0, f64::NAN] {
        let err = fbeta_score(&y, &y, beta, &opts()).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "beta", .. }));
    }
}

#[test]
fn test_precision_recall_fbeta_keys() {
    let y = v(&[0.0, 1.0, 2.0]);
    let result = precision_recall_fbeta(&y, &y, 1.0, &opts()).unwrap();
    for key in ["precision", "recall", "fbeta", "support", "labels", "count"] {
        assert!(result.contains_key(key), "missing {key}");
    }
    assert_eq!(result.scalar("fbeta_macro"), Some(1.0));
}

#[test]
fn test_precision_zero_division_is_zero() {
    // Class 2 is predicted but never present; class 1 is present but never predicted
    let y_true = v(&[0.0, 1.0]);
    let y_pred = v(&[0.0, 2.0]);
    let options = opts().with_label_type(LabelTypeSpec::Multiclass);
    let result = precision(&y_true, &y_pred, &options).unwrap();

    assert_eq!(result.vector("labels").unwrap().to_vec(), vec![0.0, 1.0, 2.0]);
    assert_eq!(result.vector("precision").unwrap().to_vec(), vec![1.0, 0.0, 0.0]);
    assert_eq!(result.vector("support").unwrap().to_vec(), vec![1.0, 1.0, 0.0]);
    assert_relative_eq!(result.scalar("precision_macro").unwrap(), 1.0 / 3.0);
    assert_relative_eq!(result.scalar("precision_weighted").unwrap(), 0.5);
    assert_relative_eq!(result.scalar("precision_micro").unwrap(), 0.5);
}

#[test]
fn test_precision_empty_is_nan() {
    let options = opts().with_label_type(LabelTypeSpec::Multiclass);
    let result = precision(&v(&[]), &v(&[]), &options).unwrap();
    assert!(result.scalar("precision_macro").unwrap().is_nan());
    assert!(result.scalar("precision_micro").unwrap().is_nan());
    assert_eq!(result.scalar("count"), Some(0.0));
}

#[test]
fn test_multilabel_recall_averages() {
    let y_true = m(&[vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]);
    let y_pred = m(&[vec![1.0, 0.0], vec![0.0, 0.0], vec![1.0, 1.0]]);
    let result = recall(&y_true, &y_pred, &opts()).unwrap();

    assert_eq!(result.vector("recall").unwrap().to_vec(), vec![1.0, 0.5]);
    assert_relative_eq!(result.scalar("recall_macro").unwrap(), 0.75);
    assert_relative_eq!(result.scalar("recall_micro").unwrap(), 0.75);
    assert_relative_eq!(result.scalar("recall_weighted").unwrap(), 0.75);
    assert_eq!(result.vector("support").unwrap().to_vec(), vec![2.0, 2.0]);
    assert!(!result.contains_key("labels"));
}

#[test]
fn test_multiclass_propagate_keeps_key_shapes() {
    let y_true = v(&[0.0, 1.0, 2.0, f64::NAN]);
    let y_pred = v(&[0.0, 1.0, 2.0, 1.0]);
    let result = precision(&y_true, &y_pred, &opts()).unwrap();

    let per_class = result.vector("precision").unwrap();
    assert_eq!(per_class.len(), 3);
    assert!(per_class.iter().all(|x| x.is_nan()));
    assert!(result.scalar("precision_macro").unwrap().is_nan());
    assert!(result.vector("support").unwrap().iter().all(|x| x.is_nan()));
    assert_eq!(result.vector("labels").unwrap().to_vec(), vec![0.0, 1.0, 2.0]);
    assert_eq!(result.scalar("count"), Some(4.0));
}

#[test]
fn test_explicit_binary_on_multiclass_labels_rejected() {
    let y = v(&[0.0, 1.0, 2.0]);
    let options = opts().with_label_type(LabelTypeSpec::Binary);
    let err = precision(&y, &y, &options).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_balanced_accuracy_binary() {
    let y_true = v(&[0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
    let y_pred = v(&[0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    let result = balanced_accuracy(&y_true, &y_pred, &opts()).unwrap();
    // (0.5 + 0.75) / 2
    assert_relative_eq!(result.scalar("balanced_accuracy").unwrap(), 0.625);
    assert_eq!(result.scalar("count"), Some(8.0));
}

#[test]
fn test_balanced_accuracy_rejects_multilabel() {
    let y = m(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
    let err = balanced_accuracy(&y, &y, &opts()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_matthews_corrcoef_binary() {
    let y_true = v(&[0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
    let y_pred = v(&[0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    let result = matthews_corrcoef(&y_true, &y_pred, &opts()).unwrap();
    // (tp*tn - fp*fn) / sqrt(...) = 4 / sqrt(240)
    assert_relative_eq!(
        result.scalar("matthews_corrcoef").unwrap(),
        4.0 / 240f64.sqrt(),
        epsilon = 1e-12
    );
}

#[test]
fn test_matthews_corrcoef_constant_is_zero() {
    let y = v(&[1.0, 1.0, 1.0]);
    let result = matthews_corrcoef(&y, &y, &opts()).unwrap();
    assert_eq!(result.scalar("matthews_corrcoef"), Some(0.0));

    let empty = matthews_corrcoef(&v(&[]), &v(&[]), &opts()).unwrap();
    assert!(empty.scalar("matthews_corrcoef").unwrap().is_nan());
}

#[test]
fn test_classification_report_layout() {
    let y_true = v(&[0.0, 1.0, 2.0, 2.0]);
    let y_pred = v(&[0.0, 1.0, 1.0, 2.0]);
    let report = classification_report(&y_true, &y_pred, &opts()).unwrap();

    assert!(report.contains("precision"));
    assert!(report.contains("Class 0"));
    assert!(report.contains("Class 2"));
    assert!(report.contains("macro avg"));
    assert!(report.contains("micro avg"));
    assert!(report.contains("weighted avg"));
    assert!(report.contains("Accuracy: 0.7500"));
    assert!(report.contains("Confusion Matrix:"));
    assert!(report.contains("Pred 2"));
}

#[test]
fn test_classification_report_multilabel() {
    let y = m(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
    let report = classification_report(&y, &y, &opts()).unwrap();
    assert!(report.contains("Label 0"));
    assert!(!report.contains("Accuracy"));
    assert!(!report.contains("Confusion Matrix"));
}

#[test]
fn test_class_counts_summed() {
    let y_true = v(&[0.0, 1.0, 2.0]);
    let y_pred = v(&[0.0, 2.0, 2.0]);
    let counts = ClassCounts::from_labels(crate::policy::LabelType::Multiclass, &y_true, &y_pred).unwrap();
    let summed = counts.summed();
    assert_eq!(summed.tp, 2);
    assert_eq!(summed.fp, 1);
    assert_eq!(summed.fn_, 1);
    assert_eq!(counts.supports(), vec![1.0, 1.0, 1.0]);
}

#[test]
fn test_average_suffixes() {
    let suffixes: Vec<&str> = Average::ALL.iter().map(Average::suffix).collect();
    assert_eq!(suffixes, vec!["macro", "micro", "weighted"]);
}

#[test]
fn test_is_positive() {
    assert!(is_positive(1.0));
    assert!(!is_positive(0.0));
    assert!(!is_positive(2.0));
    assert_eq!(BinaryCounts::default().total(), 0);
}

#[test]
fn test_binary_rejects_predictions_outside_zero_one() {
    let y_true = v(&[0.0, 0.0, 1.0, 1.0]);
    let y_pred = v(&[2.0, 0.0, 1.0, 1.0]);

    let err = accuracy(&y_true, &y_pred, &opts()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    let err = confusion_matrix_metrics(&y_true, &y_pred, &opts()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    let err = precision(&y_true, &y_pred, &opts()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    let err = classification_report(&y_true, &y_pred, &opts()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_multiclass_accuracy_and_confusion_agree() {
    let y_true = v(&[0.0, 0.0, 1.0, 1.0]);
    let y_pred = v(&[2.0, 0.0, 1.0, 1.0]);
    let options = opts().with_label_type(LabelTypeSpec::Multiclass);

    let acc = accuracy(&y_true, &y_pred, &options).unwrap();
    assert_eq!(acc.scalar("accuracy"), Some(0.75));

    let result = confusion_matrix_metrics(&y_true, &y_pred, &options).unwrap();
    let cm = result.matrix("confusion_matrix").unwrap();
    assert_eq!(cm.diag().sum(), 3.0);
    assert_eq!(cm.sum(), 4.0);
}

#[test]
fn test_multilabel_rejects_non_indicator_values() {
    let y_true = m(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
    let y_pred = m(&[vec![1.0, 0.0], vec![0.0, 3.0]]);
    let err = accuracy(&y_true, &y_pred, &opts()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    let err = jaccard_score(&y_true, &y_pred, &opts()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}
