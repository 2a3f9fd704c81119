//! Metric saving functionality

use super::format::{MetricsFormat, SaveConfig};
use crate::error::{Error, Result};
use crate::metrics::MetricMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Serialize a metric mapping in `format`.
pub fn metrics_to_string(metrics: &MetricMap, config: &SaveConfig) -> Result<String> {
    match config.format {
        MetricsFormat::Json => {
            let result = if config.pretty {
                serde_json::to_string_pretty(metrics)
            } else {
                serde_json::to_string(metrics)
            };
            result.map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))
        }
        MetricsFormat::Yaml => serde_yaml::to_string(metrics)
            .map_err(|e| Error::Serialization(format!("YAML serialization failed: {e}"))),
    }
}

/// Save a metric mapping to a file
///
/// NaN values are written as `null`.
///
/// # Example
///
/// ```no_run
/// use metrica::io::{save_metrics, MetricsFormat, SaveConfig};
/// use metrica::MetricMap;
///
/// let mut metrics = MetricMap::new();
/// metrics.insert("accuracy", 0.9);
/// save_metrics(&metrics, "metrics.json", &SaveConfig::new(MetricsFormat::Json)).unwrap();
/// ```
pub fn save_metrics(metrics: &MetricMap, path: impl AsRef<Path>, config: &SaveConfig) -> Result<()> {
    let path = path.as_ref();
    let data = metrics_to_string(metrics, config)?;
    fs::write(path, data).map_err(|e| Error::io(format!("writing {}", path.display()), e))?;
    tracing::debug!(path = %path.display(), metrics = metrics.len(), format = %config.format, "metrics saved");
    Ok(())
}

/// Persists named metric mappings.
pub trait Saver {
    /// Store `metrics` under `name`, returning where they went.
    fn save(&self, name: &str, metrics: &MetricMap) -> Result<PathBuf>;
}

/// Writes `<dir>/<name>.<ext>` files.
#[derive(Clone, Debug)]
pub struct FileSaver {
    dir: PathBuf,
    config: SaveConfig,
}

impl FileSaver {
    pub fn new(dir: impl Into<PathBuf>, config: SaveConfig) -> Self {
        Self {
            dir: dir.into(),
            config,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Saver for FileSaver {
    fn save(&self, name: &str, metrics: &MetricMap) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(Error::InvalidInput(format!(
                "metric file name '{name}' must be non-empty without path separators"
            )));
        }
        fs::create_dir_all(&self.dir)
            .map_err(|e| Error::io(format!("creating {}", self.dir.display()), e))?;
        let path = self
            .dir
            .join(format!("{name}.{}", self.config.format.extension()));
        save_metrics(metrics, &path, &self.config)?;
        Ok(path)
    }
}
