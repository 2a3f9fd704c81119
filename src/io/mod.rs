//! Metric persistence
//!
//! Metric mappings are written as string-keyed JSON or YAML documents of
//! numbers and nested arrays.

mod format;
mod load;
mod save;

pub use format::{MetricsFormat, SaveConfig};
pub use load::{load_metrics, metrics_from_str};
pub use save::{metrics_to_string, save_metrics, FileSaver, Saver};
