//! Cached metric evaluation of a `State`

use super::memo::Memo;
use crate::data::ArrayPair;
use crate::error::{Error, Result};
use crate::metrics::{
    accuracy, average_precision, balanced_accuracy, column_summary, confusion_matrix_metrics,
    jaccard_score, matthews_corrcoef, pearson, precision_recall_fbeta, regression_metrics,
    roc_auc, spearman, MetricMap,
};
use crate::policy::LabelType;
use crate::state::{State, StateData, Task};

/// Computes the metric families of a state's task once and serves formatted
/// copies afterwards.
///
/// `evaluate` takes `&mut self` to fill the cache; callers sharing an
/// evaluator across threads must serialize access themselves.
#[derive(Clone, Debug)]
pub struct Evaluator {
    state: State,
    memo: Memo<MetricMap>,
}

impl Evaluator {
    pub fn new(state: State) -> Self {
        Self {
            state,
            memo: Memo::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Compute the unformatted mapping, bypassing the cache.
    pub fn compute(&self) -> Result<MetricMap> {
        compute_metrics(&self.state)
    }

    /// Cached mapping with `prefix`/`suffix` applied to every key.
    ///
    /// The first successful call computes; later calls only reformat. Each
    /// call returns a new mapping. Errors propagate and are not cached.
    pub fn evaluate(&mut self, prefix: &str, suffix: &str) -> Result<MetricMap> {
        let state = &self.state;
        if self.memo.is_filled() {
            tracing::trace!(task = %state.task(), "evaluator cache hit");
        }
        let raw = self.memo.get_or_try_compute(|| {
            let map = compute_metrics(state)?;
            tracing::debug!(task = %state.task(), metrics = map.len(), "evaluator cache filled");
            Ok::<_, Error>(map)
        })?;
        Ok(raw.with_affixes(prefix, suffix))
    }

    /// `evaluate` with the prefix and suffix of the state's options.
    pub fn results(&mut self) -> Result<MetricMap> {
        let options = self.state.options().clone();
        self.evaluate(&options.prefix, &options.suffix)
    }

    pub fn is_computed(&self) -> bool {
        self.memo.is_filled()
    }

    /// Number of times the metrics were computed through `evaluate`.
    pub fn computations(&self) -> usize {
        self.memo.computations()
    }

    /// Evaluators are equal when their states are; cache contents do not count.
    pub fn equal(&self, other: &Self, equal_nan: bool) -> bool {
        self.state.equal(&other.state, equal_nan)
    }
}

impl From<State> for Evaluator {
    fn from(state: State) -> Self {
        Self::new(state)
    }
}

/// Array pair of a state, or an error naming the task.
pub(crate) fn require_pair(state: &State) -> Result<&ArrayPair> {
    state.data().as_pair().ok_or_else(|| {
        Error::InvalidInput(format!("task '{}' needs an array pair", state.task()))
    })
}

fn compute_metrics(state: &State) -> Result<MetricMap> {
    let options = state.options().unformatted();
    if let StateData::Table(table) = state.data() {
        return column_summary(table, &options);
    }

    let pair = require_pair(state)?;
    let (y_true, y_pred) = (pair.y_true(), pair.y_pred());
    let mut map = MetricMap::new();
    match state.task() {
        Task::Classification => {
            // Resolve once so every family agrees on the label type
            let label_type = options.label_type.resolve(y_true)?;
            let options = options.with_label_type(label_type);
            map.extend(accuracy(y_true, y_pred, &options)?);
            map.extend(precision_recall_fbeta(y_true, y_pred, state.config().beta, &options)?);
            map.extend(jaccard_score(y_true, y_pred, &options)?);
            map.extend(confusion_matrix_metrics(y_true, y_pred, &options)?);
            if label_type != LabelType::Multilabel {
                map.extend(balanced_accuracy(y_true, y_pred, &options)?);
                map.extend(matthews_corrcoef(y_true, y_pred, &options)?);
            }
        }
        Task::Scores => {
            map.extend(average_precision(y_true, y_pred, &options)?);
            map.extend(roc_auc(y_true, y_pred, &options)?);
        }
        Task::Regression => {
            let power = state.config().tweedie_power;
            map.extend(regression_metrics(y_true, y_pred, power, &options)?);
        }
        Task::Correlation => {
            map.extend(pearson(y_true, y_pred, &options)?);
            map.extend(spearman(y_true, y_pred, &options)?);
        }
        Task::Summary => {
            return Err(Error::InvalidInput("task 'summary' needs a table".into()));
        }
    }
    Ok(map)
}
