//! Metric loading functionality

use super::format::MetricsFormat;
use crate::error::{Error, Result};
use crate::metrics::MetricMap;
use std::fs;
use std::path::Path;

/// Parse a metric mapping written in `format`; `null` reads back as NaN.
pub fn metrics_from_str(content: &str, format: MetricsFormat) -> Result<MetricMap> {
    match format {
        MetricsFormat::Json => serde_json::from_str(content)
            .map_err(|e| Error::Serialization(format!("JSON deserialization failed: {e}"))),
        MetricsFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| Error::Serialization(format!("YAML deserialization failed: {e}"))),
    }
}

/// Load a metric mapping from a file
///
/// The format is detected from the file extension.
///
/// # Example
///
/// ```no_run
/// use metrica::io::load_metrics;
///
/// let metrics = load_metrics("metrics.json").unwrap();
/// println!("accuracy: {:?}", metrics.scalar("accuracy"));
/// ```
pub fn load_metrics(path: impl AsRef<Path>) -> Result<MetricMap> {
    let path = path.as_ref();

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::Serialization("File has no extension".to_string()))?;
    let format = MetricsFormat::from_extension(ext)
        .ok_or_else(|| Error::Serialization(format!("Unsupported file extension: {ext}")))?;

    let content = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
    metrics_from_str(&content, format)
}
