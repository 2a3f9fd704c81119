//! Figure backends and the table they are looked up in

use super::figure::{FigureContent, FigureSpec};
use super::text;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Turns a figure description into a concrete rendering.
pub trait FigureBackend: fmt::Debug + Send + Sync {
    /// Name the backend is registered under
    fn name(&self) -> &str;

    fn render(&self, spec: &FigureSpec) -> Result<FigureContent>;
}

/// Braille and block-character charts for terminals and `<pre>` blocks.
#[derive(Clone, Debug)]
pub struct TextBackend {
    width: usize,
    height: usize,
}

impl TextBackend {
    /// Canvas size in characters.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

impl Default for TextBackend {
    fn default() -> Self {
        Self::new(40, 12)
    }
}

impl FigureBackend for TextBackend {
    fn name(&self) -> &str {
        "text"
    }

    fn render(&self, spec: &FigureSpec) -> Result<FigureContent> {
        Ok(FigureContent::Text(text::render(spec, self.width, self.height)))
    }
}

/// The figure description itself as JSON, for a client-side plotting library.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonBackend;

impl FigureBackend for JsonBackend {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, spec: &FigureSpec) -> Result<FigureContent> {
        serde_json::to_value(spec)
            .map(FigureContent::Json)
            .map_err(|e| Error::Serialization(format!("figure '{}': {e}", spec.title())))
    }
}

/// Backends by name, passed explicitly to whoever needs to render figures.
#[derive(Clone, Debug, Default)]
pub struct BackendTable {
    backends: BTreeMap<String, Arc<dyn FigureBackend>>,
}

impl BackendTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the `text` and `json` backends.
    pub fn builtin() -> Self {
        Self::new()
            .with(TextBackend::default())
            .with(JsonBackend)
    }

    /// Register `backend` under its name, replacing any previous entry.
    pub fn register(&mut self, backend: impl FigureBackend + 'static) {
        self.backends
            .insert(backend.name().to_string(), Arc::new(backend));
    }

    pub fn with(mut self, backend: impl FigureBackend + 'static) -> Self {
        self.register(backend);
        self
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn FigureBackend>> {
        self.backends
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownBackend(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.backends.keys().map(String::as_str)
    }
}
