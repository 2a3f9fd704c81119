//! Cached HTML report generation for a `State`

use super::html::{figures_block, metrics_table};
use crate::error::{Error, Result};
use crate::evaluator::{Evaluator, Memo};
use crate::plot::{BackendTable, Plotter};
use crate::state::State;
use serde::{Deserialize, Serialize};

/// Rendered HTML fragment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub html: String,
}

/// Renders the metrics table and figures of a state into one HTML section.
///
/// Metric keys carry the prefix and suffix of the state's options.
#[derive(Clone, Debug)]
pub struct ContentGenerator {
    evaluator: Evaluator,
    plotter: Plotter,
    memo: Memo<Content>,
}

impl ContentGenerator {
    /// Fails when the configured figure backend is missing from `backends`.
    pub fn new(state: State, backends: &BackendTable) -> Result<Self> {
        let plotter = Plotter::new(state.clone(), backends)?;
        Ok(Self {
            evaluator: Evaluator::new(state),
            plotter,
            memo: Memo::new(),
        })
    }

    pub fn state(&self) -> &State {
        self.evaluator.state()
    }

    /// Cached content; each call returns a new copy.
    pub fn generate(&mut self) -> Result<Content> {
        let (evaluator, plotter) = (&mut self.evaluator, &mut self.plotter);
        let content = self.memo.get_or_try_compute(|| {
            let content = render(evaluator, plotter)?;
            tracing::debug!(bytes = content.html.len(), "content cache filled");
            Ok::<_, Error>(content)
        })?;
        Ok(content.clone())
    }

    pub fn is_computed(&self) -> bool {
        self.memo.is_filled()
    }

    pub fn computations(&self) -> usize {
        self.memo.computations()
    }

    pub fn equal(&self, other: &Self, equal_nan: bool) -> bool {
        self.plotter.equal(&other.plotter, equal_nan)
    }
}

fn render(evaluator: &mut Evaluator, plotter: &mut Plotter) -> Result<Content> {
    let metrics = evaluator.results()?;
    let figures = plotter.plot()?;
    let task = evaluator.state().task();

    let mut html = String::new();
    html.push_str(&format!("<section class=\"metrica\" data-task=\"{task}\">\n"));
    html.push_str(&format!("<h2>{task} ({} rows)</h2>\n", evaluator.state().n_rows()));
    html.push_str(&metrics_table(&metrics));
    html.push_str(&figures_block(&figures)?);
    html.push_str("</section>\n");
    Ok(Content { html })
}
