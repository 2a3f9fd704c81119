//! Lazy-or-ready results of output accessors

use crate::content::{Content, ContentGenerator};
use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::metrics::MetricMap;
use crate::plot::{FigureMap, Plotter};

/// A component that produces one cached result.
pub trait Component {
    type Output;

    /// Compute or fetch the cached result.
    fn run(&mut self) -> Result<Self::Output>;
}

impl Component for Evaluator {
    type Output = MetricMap;

    fn run(&mut self) -> Result<MetricMap> {
        self.results()
    }
}

impl Component for Plotter {
    type Output = FigureMap;

    fn run(&mut self) -> Result<FigureMap> {
        self.plot()
    }
}

impl Component for ContentGenerator {
    type Output = Content;

    fn run(&mut self) -> Result<Content> {
        self.generate()
    }
}

/// Either an uncomputed component or its finished result.
#[derive(Clone, Debug)]
pub enum Deferred<C: Component> {
    Lazy(C),
    Ready(C::Output),
}

impl<C: Component> Deferred<C> {
    /// Wrap `component`, running it now unless `lazy`.
    pub fn new(mut component: C, lazy: bool) -> Result<Self> {
        if lazy {
            Ok(Self::Lazy(component))
        } else {
            Ok(Self::Ready(component.run()?))
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }

    pub fn ready(&self) -> Option<&C::Output> {
        match self {
            Self::Lazy(_) => None,
            Self::Ready(output) => Some(output),
        }
    }

    pub fn component(&self) -> Option<&C> {
        match self {
            Self::Lazy(component) => Some(component),
            Self::Ready(_) => None,
        }
    }

    /// The result, computing it first when still lazy.
    pub fn force(self) -> Result<C::Output> {
        match self {
            Self::Lazy(mut component) => component.run(),
            Self::Ready(output) => Ok(output),
        }
    }
}
