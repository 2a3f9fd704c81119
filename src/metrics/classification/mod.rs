//! Classification metrics
//!
//! Provides label-based classification metrics including:
//! - Accuracy, balanced accuracy and Matthews correlation
//! - Per-class precision, recall, F-beta and Jaccard
//! - Macro, micro, and weighted averaging
//! - Confusion matrix counts and rates
//! - sklearn-style classification reports

mod accuracy;
mod average;
mod confusion;
mod confusion_metrics;
mod counts;
mod family;
mod fbeta;
mod jaccard;
mod report;

#[cfg(test)]
mod tests;


pub use accuracy::{accuracy, balanced_accuracy, matthews_corrcoef};
pub use average::Average;
pub use confusion::ConfusionMatrix;
pub use confusion_metrics::confusion_matrix_metrics;
pub use counts::{BinaryCounts, ClassCounts};
pub use fbeta::{f1_score, fbeta_score, precision, precision_recall_fbeta, recall};
pub use jaccard::jaccard_score;
pub use report::classification_report;

pub(crate) use counts::is_positive;
