//! Per-call metric options

use crate::policy::{LabelTypeSpec, NanPolicy};
use serde::{Deserialize, Serialize};

/// Options shared by every metric function.
///
/// `prefix` and `suffix` only format keys; they never change values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricOptions {
    pub label_type: LabelTypeSpec,
    pub nan_policy: NanPolicy,
    pub prefix: String,
    pub suffix: String,
}

impl MetricOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label_type(mut self, label_type: impl Into<LabelTypeSpec>) -> Self {
        self.label_type = label_type.into();
        self
    }

    pub fn with_nan_policy(mut self, nan_policy: NanPolicy) -> Self {
        self.nan_policy = nan_policy;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Same options without key formatting.
    pub fn unformatted(&self) -> Self {
        Self {
            label_type: self.label_type,
            nan_policy: self.nan_policy,
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}
