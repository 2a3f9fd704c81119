//! Ordered metric mappings

use crate::data::elements_equal;
use ndarray::{Array1, Array2};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single metric value: scalar, per-class vector or matrix.
#[derive(Clone, Debug)]
pub enum MetricValue {
    Scalar(f64),
    Vector(Array1<f64>),
    Matrix(Array2<f64>),
}

impl MetricValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Array1<f64>> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Array2<f64>> {
        match self {
            Self::Matrix(m) => Some(m),
            _ => None,
        }
    }

    /// Same shape, every element NaN.
    pub fn to_nan(&self) -> Self {
        match self {
            Self::Scalar(_) => Self::Scalar(f64::NAN),
            Self::Vector(v) => Self::Vector(Array1::from_elem(v.len(), f64::NAN)),
            Self::Matrix(m) => Self::Matrix(Array2::from_elem(m.dim(), f64::NAN)),
        }
    }

    pub fn equal(&self, other: &Self, equal_nan: bool) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => elements_equal(*a, *b, equal_nan),
            (Self::Vector(a), Self::Vector(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(&x, &y)| elements_equal(x, y, equal_nan))
            }
            (Self::Matrix(a), Self::Matrix(b)) => {
                a.dim() == b.dim()
                    && a.iter().zip(b.iter()).all(|(&x, &y)| elements_equal(x, y, equal_nan))
            }
            _ => false,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        Self::Scalar(v as f64)
    }
}

impl From<Vec<f64>> for MetricValue {
    fn from(v: Vec<f64>) -> Self {
        Self::Vector(Array1::from(v))
    }
}

impl From<Array1<f64>> for MetricValue {
    fn from(v: Array1<f64>) -> Self {
        Self::Vector(v)
    }
}

impl From<Array2<f64>> for MetricValue {
    fn from(m: Array2<f64>) -> Self {
        Self::Matrix(m)
    }
}

/// Insertion-ordered mapping from metric name to value.
///
/// Every mapping produced by a metric function carries a `"count"` key holding the
/// effective sample count.
#[derive(Clone, Debug, Default)]
pub struct MetricMap {
    entries: Vec<(String, MetricValue)>,
}

impl MetricMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetricValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Scalar value under `name`, if present and scalar.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(MetricValue::as_scalar)
    }

    pub fn vector(&self, name: &str) -> Option<&Array1<f64>> {
        self.get(name).and_then(MetricValue::as_vector)
    }

    pub fn matrix(&self, name: &str) -> Option<&Array2<f64>> {
        self.get(name).and_then(MetricValue::as_matrix)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<MetricValue> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Append all entries of `other`.
    pub fn extend(&mut self, other: MetricMap) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }

    /// Copy with `prefix` and `suffix` added to every key.
    pub fn with_affixes(&self, prefix: &str, suffix: &str) -> Self {
        if prefix.is_empty() && suffix.is_empty() {
            return self.clone();
        }
        Self {
            entries: self
                .entries
                .iter()
                .map(|(n, v)| (format!("{prefix}{n}{suffix}"), v.clone()))
                .collect(),
        }
    }

    /// Inverse of `with_affixes`; keys lacking the affixes are kept as-is.
    pub fn strip_affixes(&self, prefix: &str, suffix: &str) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(n, v)| {
                    let stripped = n
                        .strip_prefix(prefix)
                        .and_then(|rest| rest.strip_suffix(suffix))
                        .unwrap_or(n.as_str());
                    (stripped.to_string(), v.clone())
                })
                .collect(),
        }
    }

    /// Replace every value with NaN of the same shape, except `"count"`, which
    /// becomes `count`, and `"labels"`, which still names the per-class entries.
    pub(crate) fn poison(&mut self, count: usize) {
        for (name, value) in &mut self.entries {
            match name.as_str() {
                "count" => *value = MetricValue::Scalar(count as f64),
                "labels" => {}
                _ => *value = value.to_nan(),
            }
        }
    }

    /// Same keys in the same order with equal values.
    pub fn equal(&self, other: &Self, equal_nan: bool) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((na, a), (nb, b))| na == nb && a.equal(b, equal_nan))
    }
}

impl fmt::Display for MetricMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.entries {
            match value {
                MetricValue::Scalar(v) => writeln!(f, "{name}: {v:.4}")?,
                MetricValue::Vector(v) => writeln!(f, "{name}: {v:.4}")?,
                MetricValue::Matrix(m) => writeln!(f, "{name}:\n{m:.4}")?,
            }
        }
        Ok(())
    }
}

// Persisted form: a string-keyed map whose values are numbers, arrays of numbers
// or arrays of rows. NaN is written as null and read back as NaN. A matrix with
// no rows would read back as an empty vector, so it is written as `{"shape": [0, k]}`.

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Scalar(Option<f64>),
    Vector(Vec<Option<f64>>),
    Matrix(Vec<Vec<Option<f64>>>),
    EmptyMatrix { shape: [usize; 2] },
}

fn nullable(v: f64) -> Option<f64> {
    if v.is_nan() {
        None
    } else {
        Some(v)
    }
}

fn unnull(v: Option<f64>) -> f64 {
    v.unwrap_or(f64::NAN)
}

impl From<&MetricValue> for RawValue {
    fn from(value: &MetricValue) -> Self {
        match value {
            MetricValue::Scalar(v) => Self::Scalar(nullable(*v)),
            MetricValue::Vector(v) => Self::Vector(v.iter().copied().map(nullable).collect()),
            MetricValue::Matrix(m) if m.nrows() == 0 => Self::EmptyMatrix {
                shape: [0, m.ncols()],
            },
            MetricValue::Matrix(m) => Self::Matrix(
                m.rows()
                    .into_iter()
                    .map(|row| row.iter().copied().map(nullable).collect())
                    .collect(),
            ),
        }
    }
}

impl RawValue {
    fn into_value(self) -> std::result::Result<MetricValue, String> {
        Ok(match self {
            Self::Scalar(v) => MetricValue::Scalar(unnull(v)),
            Self::Vector(v) => MetricValue::Vector(v.into_iter().map(unnull).collect()),
            Self::Matrix(rows) => {
                let n_cols = rows.first().map_or(0, Vec::len);
                if rows.iter().any(|r| r.len() != n_cols) {
                    return Err("ragged matrix rows".to_string());
                }
                let flat: Vec<f64> = rows.iter().flatten().copied().map(unnull).collect();
                let m = Array2::from_shape_vec((rows.len(), n_cols), flat)
                    .map_err(|e| e.to_string())?;
                MetricValue::Matrix(m)
            }
            Self::EmptyMatrix { shape: [rows, cols] } => {
                if rows != 0 {
                    return Err(format!("matrix with shape [{rows}, {cols}] has no data"));
                }
                MetricValue::Matrix(Array2::zeros((0, cols)))
            }
        })
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        RawValue::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MetricValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        RawValue::deserialize(deserializer)?
            .into_value()
            .map_err(serde::de::Error::custom)
    }
}

impl Serialize for MetricMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct MetricMapVisitor;

impl<'de> Visitor<'de> for MetricMapVisitor {
    type Value = MetricMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of metric names to numbers or arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<MetricMap, A::Error> {
        let mut map = MetricMap::new();
        while let Some((name, value)) = access.next_entry::<String, MetricValue>()? {
            map.insert(name, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for MetricMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(MetricMapVisitor)
    }
}
