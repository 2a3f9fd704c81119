//! Error types for metric computation.
//!
//! Errors fall into four groups:
//! - configuration errors, raised when options or a `State` are built
//! - shape errors, raised at metric-function entry before any filtering
//! - NaN-policy violations, raised after filtering when the policy is `raise`
//! - domain errors for values a metric cannot accept
//!
//! Degenerate or empty input is never an error: it yields NaN metrics.

use thiserror::Error;

/// Result type alias for metric operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by metric functions, evaluators and plotters.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown NaN policy string.
    #[error("Invalid nan_policy '{0}'\n  → Expected one of: propagate, omit, raise")]
    InvalidNanPolicy(String),

    /// Unknown label type string.
    #[error("Invalid label_type '{0}'\n  → Expected one of: auto, binary, multiclass, multilabel")]
    InvalidLabelType(String),

    /// Numeric parameter outside its valid range.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// `y_true` and `y_pred` shapes cannot be paired.
    #[error("Shape mismatch: y_true has shape {y_true:?}, y_pred has shape {y_pred:?}")]
    ShapeMismatch { y_true: Vec<usize>, y_pred: Vec<usize> },

    /// NaN present while the policy is `raise`.
    #[error("Input {array} contains NaN and nan_policy is 'raise'")]
    NanEncountered { array: &'static str },

    /// Values outside a metric's domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Figure backend not present in the backend table.
    #[error("Unknown figure backend '{0}'\n  → Register it in the BackendTable passed to the plotter")]
    UnknownBackend(String),

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid-parameter error.
    pub fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error is raised while building configuration, before data is touched.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidNanPolicy(_)
                | Self::InvalidLabelType(_)
                | Self::InvalidParameter { .. }
                | Self::UnknownBackend(_)
        )
    }

    /// Stable error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidNanPolicy(_) => "M001",
            Self::InvalidLabelType(_) => "M002",
            Self::InvalidParameter { .. } => "M003",
            Self::UnknownBackend(_) => "M004",
            Self::ShapeMismatch { .. } => "M010",
            Self::NanEncountered { .. } => "M020",
            Self::InvalidInput(_) => "M030",
            Self::Io { .. } => "M050",
            Self::Serialization(_) => "M051",
        }
    }
}
