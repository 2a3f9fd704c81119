//! Minimal columnar table

use super::values::elements_equal;
use crate::error::{Error, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Ordered set of named numeric columns of equal length. NaN marks a null.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<(String, Array1<f64>)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Its length must match the existing columns and its name must be new.
    pub fn with_column(mut self, name: impl Into<String>, values: impl Into<Vec<f64>>) -> Result<Self> {
        let name = name.into();
        let values = Array1::from(values.into());
        if let Some((_, first)) = self.columns.first() {
            if first.len() != values.len() {
                return Err(Error::ShapeMismatch {
                    y_true: vec![first.len()],
                    y_pred: vec![values.len()],
                });
            }
        }
        if self.column(&name).is_some() {
            return Err(Error::InvalidInput(format!("duplicate column '{name}'")));
        }
        self.columns.push((name, values));
        Ok(self)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in order.
    pub fn schema(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Array1<f64>> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Array1<f64>)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Null (NaN) count per column, in schema order.
    pub fn null_counts(&self) -> Vec<(&str, usize)> {
        self.columns
            .iter()
            .map(|(n, c)| (n.as_str(), c.iter().filter(|x| x.is_nan()).count()))
            .collect()
    }

    pub fn equal(&self, other: &Self, equal_nan: bool) -> bool {
        self.columns.len() == other.columns.len()
            && self
                .columns
                .iter()
                .zip(other.columns.iter())
                .all(|((na, a), (nb, b))| {
                    na == nb
                        && a.len() == b.len()
                        && a.iter().zip(b.iter()).all(|(&x, &y)| elements_equal(x, y, equal_nan))
                })
    }
}
