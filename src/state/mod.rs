//! Analysis state
//!
//! A [`State`] bundles the data, the task and the validated configuration that
//! an evaluator, plotter and content generator all read from.

mod analysis;
mod task;


pub use analysis::{State, StateData};
pub use task::Task;
