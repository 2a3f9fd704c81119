//! Metric evaluation with caching
//!
//! An [`Evaluator`] computes the metric families of a [`State`](crate::state::State)
//! at most once; [`Memo`] is the single-slot cache behind it and behind the
//! plotter and content generator.

mod memo;
mod metrics;

#[cfg(test)]
mod tests;

pub use memo::Memo;
pub use metrics::Evaluator;
pub(crate) use metrics::require_pair;
