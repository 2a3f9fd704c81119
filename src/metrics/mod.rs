//! Metric functions
//!
//! Every function takes the ground truth, the predictions (labels or scores)
//! and [`MetricOptions`](crate::config::MetricOptions), and returns a flat,
//! insertion-ordered [`MetricMap`] that always carries `count`.

pub mod classification;
pub(crate) mod common;
pub mod correlation;
pub mod map;
pub mod ranking;
pub mod regression;
pub mod summary;

pub use classification::{
    accuracy, balanced_accuracy, classification_report, confusion_matrix_metrics, f1_score,
    fbeta_score, jaccard_score, matthews_corrcoef, precision, precision_recall_fbeta, recall,
    Average, BinaryCounts, ClassCounts, ConfusionMatrix,
};
pub use correlation::{pearson, spearman};
pub use map::{MetricMap, MetricValue};
pub use ranking::{
    average_precision, precision_recall_curve, roc_auc, roc_curve, PrecisionRecallCurve, RocCurve,
};
pub use regression::{
    energy_distance, mean_absolute_error, mean_squared_error, mean_tweedie_deviance, r2_score,
    regression_metrics, root_mean_squared_error, wasserstein_distance,
};
pub use summary::column_summary;
