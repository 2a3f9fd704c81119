//! One state bound to its evaluator, plotter and content generator

use super::deferred::Deferred;
use crate::content::ContentGenerator;
use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::metrics::MetricMap;
use crate::plot::{BackendTable, Plotter};
use crate::state::State;

/// Composition root for one analysed state.
///
/// Every accessor builds components over a shallow clone of the state, so
/// they all read the same buffers.
#[derive(Clone, Debug)]
pub struct Output {
    state: State,
    backends: BackendTable,
}

impl Output {
    pub fn new(state: State, backends: BackendTable) -> Self {
        Self { state, backends }
    }

    /// Output rendering figures with the built-in backends.
    pub fn with_builtin_backends(state: State) -> Self {
        Self::new(state, BackendTable::builtin())
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// `lazy` returns the evaluator uncomputed; otherwise its formatted metrics.
    pub fn get_evaluator(&self, lazy: bool) -> Result<Deferred<Evaluator>> {
        Deferred::new(Evaluator::new(self.state.clone_state(false)), lazy)
    }

    /// `lazy` returns the plotter uncomputed; otherwise its figures.
    pub fn get_plotter(&self, lazy: bool) -> Result<Deferred<Plotter>> {
        Deferred::new(Plotter::new(self.state.clone_state(false), &self.backends)?, lazy)
    }

    /// `lazy` returns the generator uncomputed; otherwise the rendered content.
    pub fn get_content_generator(&self, lazy: bool) -> Result<Deferred<ContentGenerator>> {
        Deferred::new(
            ContentGenerator::new(self.state.clone_state(false), &self.backends)?,
            lazy,
        )
    }
}

/// Evaluate many outputs, one result per output in input order.
///
/// With the `parallel` feature the outputs are spread over the rayon pool;
/// each evaluator is only ever touched by one thread.
pub fn evaluate_all(outputs: &[Output]) -> Vec<Result<MetricMap>> {
    tracing::debug!(outputs = outputs.len(), "evaluating outputs");
    let eager = |output: &Output| output.get_evaluator(false)?.force();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        outputs.par_iter().map(eager).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        outputs.iter().map(eager).collect()
    }
}
