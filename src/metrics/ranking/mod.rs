//! Score-based ranking metrics
//!
//! - ROC and precision-recall curves
//! - Average precision and ROC AUC with macro, micro and weighted averaging

mod curve;
mod scores;


pub use curve::{precision_recall_curve, roc_curve, PrecisionRecallCurve, RocCurve};
pub use scores::{average_precision, roc_auc};

pub(crate) use curve::has_both_classes;
pub(crate) use scores::ScoreColumns;
