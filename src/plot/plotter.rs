//! Cached figure production for a `State`

use super::backend::{BackendTable, FigureBackend};
use super::figure::{Figure, FigureMap};
use super::specs::figure_specs;
use crate::error::{Error, Result};
use crate::evaluator::Memo;
use crate::state::State;
use std::sync::Arc;

/// Builds the figures of a state's task with one backend and caches them.
///
/// Same contract as [`Evaluator`](crate::evaluator::Evaluator): the first
/// successful `plot` computes, later calls return copies of the cache, and
/// failures are not cached.
#[derive(Clone, Debug)]
pub struct Plotter {
    state: State,
    backend: Arc<dyn FigureBackend>,
    memo: Memo<FigureMap>,
}

impl Plotter {
    /// Look up the state's configured backend in `backends`.
    pub fn new(state: State, backends: &BackendTable) -> Result<Self> {
        let backend = backends.get(&state.config().figure_backend)?;
        Ok(Self {
            state,
            backend,
            memo: Memo::new(),
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Build and render every figure, bypassing the cache.
    pub fn compute(&self) -> Result<FigureMap> {
        render_figures(&self.state, self.backend.as_ref())
    }

    /// Cached figures; each call returns a new mapping.
    pub fn plot(&mut self) -> Result<FigureMap> {
        let (state, backend) = (&self.state, self.backend.as_ref());
        if self.memo.is_filled() {
            tracing::trace!(task = %state.task(), "plotter cache hit");
        }
        let figures = self.memo.get_or_try_compute(|| {
            let figures = render_figures(state, backend)?;
            tracing::debug!(
                task = %state.task(),
                backend = backend.name(),
                figures = figures.len(),
                "plotter cache filled"
            );
            Ok::<_, Error>(figures)
        })?;
        Ok(figures.clone())
    }

    pub fn is_computed(&self) -> bool {
        self.memo.is_filled()
    }

    pub fn computations(&self) -> usize {
        self.memo.computations()
    }

    /// Equal states and backend names; cache contents do not count.
    pub fn equal(&self, other: &Self, equal_nan: bool) -> bool {
        self.backend.name() == other.backend.name() && self.state.equal(&other.state, equal_nan)
    }
}

fn render_figures(state: &State, backend: &dyn FigureBackend) -> Result<FigureMap> {
    let mut figures = FigureMap::new();
    for (name, spec) in figure_specs(state)? {
        let content = backend.render(&spec)?;
        figures.insert(
            name,
            Figure {
                spec,
                backend: backend.name().to_string(),
                content,
            },
        );
    }
    Ok(figures)
}
