//! Metric computation and cached evaluation for model predictions and tables.
//!
//! This crate provides:
//! - Metric functions for classification, ranking scores, regression,
//!   correlation and table summaries, all returning an ordered [`MetricMap`]
//! - NaN policies (`propagate`, `omit`, `raise`) and label-type resolution
//!   applied the same way by every function
//! - An immutable [`State`] with cached [`Evaluator`], [`Plotter`] and
//!   [`ContentGenerator`] components, composed by [`Output`]
//! - JSON/YAML persistence of metric mappings
//!
//! # Example
//!
//! ```
//! use metrica::{accuracy, MetricOptions, Values};
//!
//! let y_true = Values::vector(vec![1.0, 0.0, 0.0, 1.0, 1.0]);
//! let y_pred = Values::vector(vec![1.0, 0.0, 0.0, 1.0, 1.0]);
//! let m = accuracy(&y_true, &y_pred, &MetricOptions::default()).unwrap();
//!
//! assert_eq!(m.scalar("accuracy"), Some(1.0));
//! assert_eq!(m.scalar("count"), Some(5.0));
//! ```
//!
//! # Cached evaluation
//!
//! ```
//! use metrica::{AnalysisConfig, Evaluator, State, Task, Values};
//!
//! let state = State::pair(
//!     Values::vector(vec![3.0, -0.5, 2.0, 7.0]),
//!     Values::vector(vec![2.5, 0.0, 2.0, 8.0]),
//!     Task::Regression,
//!     AnalysisConfig::default(),
//! )
//! .unwrap();
//! let mut evaluator = Evaluator::new(state);
//!
//! let raw = evaluator.evaluate("", "").unwrap();
//! let val = evaluator.evaluate("val_", "").unwrap();
//! assert_eq!(raw.scalar("mean_absolute_error"), Some(0.5));
//! assert_eq!(val.scalar("val_mean_absolute_error"), Some(0.5));
//! assert_eq!(evaluator.computations(), 1);
//! ```

pub mod config;
pub mod content;
pub mod data;
pub mod error;
pub mod evaluator;
pub mod io;
pub mod metrics;
pub mod output;
pub mod plot;
pub mod policy;
pub mod state;

pub use config::{AnalysisConfig, MetricOptions, MetricsConfig};
pub use content::{Content, ContentGenerator};
pub use data::{ArrayPair, Table, Values};
pub use error::{Error, Result};
pub use evaluator::{Evaluator, Memo};
pub use metrics::{
    accuracy, average_precision, balanced_accuracy, classification_report, column_summary,
    confusion_matrix_metrics, energy_distance, f1_score, fbeta_score, jaccard_score,
    matthews_corrcoef, mean_absolute_error, mean_squared_error, mean_tweedie_deviance, pearson,
    precision, precision_recall_curve, precision_recall_fbeta, r2_score, recall,
    regression_metrics, roc_auc, roc_curve, root_mean_squared_error, spearman,
    wasserstein_distance, Average, MetricMap, MetricValue,
};
pub use output::{evaluate_all, Deferred, Output};
pub use plot::{BackendTable, Figure, FigureBackend, FigureContent, FigureMap, FigureSpec, Plotter};
pub use policy::{LabelType, LabelTypeSpec, NanPolicy};
pub use state::{State, StateData, Task};
