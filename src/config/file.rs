//! Analysis configuration loaded from YAML or JSON
//!
//! `MetricsConfig` mirrors the on-disk document with plain strings; `validate`
//! converts it into a typed `AnalysisConfig`, rejecting bad values before any
//! data is read.

use super::options::MetricOptions;
use crate::error::{Error, Result};
use crate::policy::{LabelTypeSpec, NanPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_nan_policy() -> String {
    "propagate".to_string()
}

fn default_label_type() -> String {
    "auto".to_string()
}

fn default_beta() -> f64 {
    1.0
}

fn default_backend() -> String {
    "text".to_string()
}

fn default_bins() -> usize {
    10
}

/// Analysis configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// One of: propagate, omit, raise
    #[serde(default = "default_nan_policy")]
    pub nan_policy: String,

    /// One of: auto, binary, multiclass, multilabel
    #[serde(default = "default_label_type")]
    pub label_type: String,

    /// F-beta weight of recall (must be > 0)
    #[serde(default = "default_beta")]
    pub beta: f64,

    /// Tweedie power (0, 1, 2, < 0 or > 1; never in (0, 1))
    #[serde(default)]
    pub tweedie_power: f64,

    #[serde(default)]
    pub prefix: String,

    #[serde(default)]
    pub suffix: String,

    /// Name of the figure backend used by plotters
    #[serde(default = "default_backend")]
    pub figure_backend: String,

    /// Histogram bin count (must be > 0)
    #[serde(default = "default_bins")]
    pub bins: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            nan_policy: default_nan_policy(),
            label_type: default_label_type(),
            beta: default_beta(),
            tweedie_power: 0.0,
            prefix: String::new(),
            suffix: String::new(),
            figure_backend: default_backend(),
            bins: default_bins(),
        }
    }
}

/// Validated, typed analysis configuration held by a `State`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub options: MetricOptions,
    pub beta: f64,
    pub tweedie_power: f64,
    pub figure_backend: String,
    pub bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            options: MetricOptions::default(),
            beta: default_beta(),
            tweedie_power: 0.0,
            figure_backend: default_backend(),
            bins: default_bins(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_options(mut self, options: MetricOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_tweedie_power(mut self, power: f64) -> Self {
        self.tweedie_power = power;
        self
    }

    pub fn with_figure_backend(mut self, backend: impl Into<String>) -> Self {
        self.figure_backend = backend.into();
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    /// Numeric parameters are checked again here for configs built in code.
    pub fn validate(&self) -> Result<()> {
        validate_beta(self.beta)?;
        validate_tweedie_power(self.tweedie_power)?;
        validate_bins(self.bins)
    }
}

impl MetricsConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::Serialization(format!("YAML deserialization failed: {e}")))
    }

    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Serialization(format!("JSON deserialization failed: {e}")))
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading config {}", path.display()), e))?;
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            Some(ext) => Err(Error::Serialization(format!(
                "Unsupported config extension: {ext}"
            ))),
            None => Err(Error::Serialization("Config file has no extension".into())),
        }
    }

    /// Check every field and convert into a typed configuration.
    pub fn validate(&self) -> Result<AnalysisConfig> {
        let nan_policy: NanPolicy = self.nan_policy.parse()?;
        let label_type: LabelTypeSpec = self.label_type.parse()?;
        validate_beta(self.beta)?;
        validate_tweedie_power(self.tweedie_power)?;
        validate_bins(self.bins)?;
        if self.figure_backend.trim().is_empty() {
            return Err(Error::invalid_parameter(
                "figure_backend",
                "\"\"",
                "must name a registered backend",
            ));
        }

        Ok(AnalysisConfig {
            options: MetricOptions {
                label_type,
                nan_policy,
                prefix: self.prefix.clone(),
                suffix: self.suffix.clone(),
            },
            beta: self.beta,
            tweedie_power: self.tweedie_power,
            figure_backend: self.figure_backend.clone(),
            bins: self.bins,
        })
    }
}

pub(crate) fn validate_beta(beta: f64) -> Result<()> {
    if beta.is_finite() && beta > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_parameter("beta", beta, "must be > 0"))
    }
}

pub(crate) fn validate_tweedie_power(power: f64) -> Result<()> {
    if !power.is_finite() || (power > 0.0 && power < 1.0) {
        Err(Error::invalid_parameter(
            "tweedie_power",
            power,
            "must be <= 0 or >= 1",
        ))
    } else {
        Ok(())
    }
}

pub(crate) fn validate_bins(bins: usize) -> Result<()> {
    if bins == 0 {
        Err(Error::invalid_parameter("bins", bins, "must be > 0"))
    } else {
        Ok(())
    }
}
