//! Regression metrics
//!
//! Error metrics, Tweedie deviance and distribution distances. Matrix inputs
//! are multi-output: each metric yields one value per column plus its mean.

mod bundle;
mod distance;
mod errors;
mod outputs;
mod tweedie;


pub use bundle::regression_metrics;
pub use distance::{energy_distance, wasserstein_distance};
pub use errors::{mean_absolute_error, mean_squared_error, r2_score, root_mean_squared_error};
pub use tweedie::mean_tweedie_deviance;
