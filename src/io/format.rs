//! Persistence formats and save options

use serde::{Deserialize, Serialize};
use std::fmt;

/// On-disk format of a metric mapping
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsFormat {
    Json,
    Yaml,
}

impl MetricsFormat {
    /// Format for a file extension, case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for MetricsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Options for writing metric files
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveConfig {
    pub format: MetricsFormat,
    /// Indented JSON; YAML is always block style
    pub pretty: bool,
}

impl SaveConfig {
    pub fn new(format: MetricsFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self::new(MetricsFormat::Json)
    }
}
