//! Configuration
//!
//! - `MetricOptions`: label type, NaN policy and key affixes for one metric call
//! - `MetricsConfig`: YAML/JSON analysis document
//! - `AnalysisConfig`: validated form held by a `State`

mod file;
mod options;


pub use file::{AnalysisConfig, MetricsConfig};
pub(crate) use file::{validate_beta, validate_tweedie_power};
pub use options::MetricOptions;
