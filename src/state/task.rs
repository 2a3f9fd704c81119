//! Analysis tasks

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which metric families and figures a `State` is analysed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// Predicted labels against true labels
    Classification,
    /// Continuous scores against true labels (ROC, precision-recall)
    Scores,
    /// Continuous predictions against continuous targets
    Regression,
    /// Association between two numeric arrays
    Correlation,
    /// Descriptive statistics of a table
    Summary,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Scores => "scores",
            Self::Regression => "regression",
            Self::Correlation => "correlation",
            Self::Summary => "summary",
        }
    }

    /// Whether the task reads a table instead of an array pair.
    pub fn uses_table(&self) -> bool {
        matches!(self, Self::Summary)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
