//! Immutable analysis state

use super::task::Task;
use crate::config::{AnalysisConfig, MetricOptions, MetricsConfig};
use crate::data::{ArrayPair, Table, Values};
use crate::error::{Error, Result};
use std::sync::Arc;

/// Data a `State` is built from.
#[derive(Clone, Debug)]
pub enum StateData {
    Pair(ArrayPair),
    Table(Table),
}

impl StateData {
    pub fn n_rows(&self) -> usize {
        match self {
            Self::Pair(pair) => pair.n_rows(),
            Self::Table(table) => table.n_rows(),
        }
    }

    pub fn as_pair(&self) -> Option<&ArrayPair> {
        match self {
            Self::Pair(pair) => Some(pair),
            Self::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Pair(_) => None,
            Self::Table(table) => Some(table),
        }
    }

    pub fn equal(&self, other: &Self, equal_nan: bool) -> bool {
        match (self, other) {
            (Self::Pair(a), Self::Pair(b)) => a.equal(b, equal_nan),
            (Self::Table(a), Self::Table(b)) => a.equal(b, equal_nan),
            _ => false,
        }
    }
}

impl From<ArrayPair> for StateData {
    fn from(pair: ArrayPair) -> Self {
        Self::Pair(pair)
    }
}

impl From<Table> for StateData {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

/// Data plus everything needed to analyse it.
///
/// A `State` never changes after construction. Its data sits behind an `Arc`:
/// `clone_state(false)` shares the buffers, `clone_state(true)` copies them.
/// Cloning with `Clone` is shallow.
#[derive(Clone, Debug)]
pub struct State {
    data: Arc<StateData>,
    task: Task,
    config: AnalysisConfig,
}

impl State {
    /// Build a state, validating the configuration before the data is looked at.
    ///
    /// The summary task needs a table; every other task needs an array pair.
    pub fn new(data: impl Into<StateData>, task: Task, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let data = data.into();
        if task.uses_table() != matches!(data, StateData::Table(_)) {
            return Err(Error::InvalidInput(format!(
                "task '{task}' cannot analyse {}",
                match data {
                    StateData::Pair(_) => "an array pair",
                    StateData::Table(_) => "a table",
                }
            )));
        }
        tracing::debug!(%task, rows = data.n_rows(), "state created");
        Ok(Self {
            data: Arc::new(data),
            task,
            config,
        })
    }

    /// Build a state from an unvalidated configuration document.
    pub fn from_config(
        data: impl Into<StateData>,
        task: Task,
        config: &MetricsConfig,
    ) -> Result<Self> {
        Self::new(data, task, config.validate()?)
    }

    /// Shorthand for an array-pair state.
    pub fn pair(y_true: Values, y_pred: Values, task: Task, config: AnalysisConfig) -> Result<Self> {
        // Configuration errors come before shape errors
        config.validate()?;
        Self::new(ArrayPair::new(y_true, y_pred)?, task, config)
    }

    /// Shorthand for a summary state.
    pub fn table(table: Table, config: AnalysisConfig) -> Result<Self> {
        Self::new(table, Task::Summary, config)
    }

    pub fn data(&self) -> &StateData {
        &self.data
    }

    pub fn task(&self) -> Task {
        self.task
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn options(&self) -> &MetricOptions {
        &self.config.options
    }

    pub fn n_rows(&self) -> usize {
        self.data.n_rows()
    }

    /// Structural equality; arrays compare with the NaN-equality flag.
    pub fn equal(&self, other: &Self, equal_nan: bool) -> bool {
        self.task == other.task
            && self.config == other.config
            && self.data.equal(&other.data, equal_nan)
    }

    /// Copy of this state. `deep` duplicates the underlying arrays.
    pub fn clone_state(&self, deep: bool) -> Self {
        let data = if deep {
            Arc::new(StateData::clone(&self.data))
        } else {
            Arc::clone(&self.data)
        };
        Self {
            data,
            task: self.task,
            config: self.config.clone(),
        }
    }

    /// Whether both states read the same buffers.
    pub fn shares_data_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}
