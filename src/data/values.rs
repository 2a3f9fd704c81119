//! Numeric arrays of rank 1 or 2

use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Owned numeric array holding labels, predictions or scores.
///
/// Class labels are encoded as `f64`; NaN marks a missing value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Values {
    /// Shape `(n,)`
    Vector(Array1<f64>),
    /// Shape `(n, k)`
    Matrix(Array2<f64>),
}

impl Values {
    /// Build a rank-1 array.
    pub fn vector(values: impl Into<Vec<f64>>) -> Self {
        Self::Vector(Array1::from(values.into()))
    }

    /// Build a rank-2 array from row vectors. All rows must share one length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(Error::ShapeMismatch {
                y_true: vec![rows.len(), n_cols],
                y_pred: vec![rows.len(), bad.len()],
            });
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Array2::from_shape_vec((rows.len(), n_cols), flat)
            .map(Self::Matrix)
            .map_err(|e| Error::InvalidInput(format!("cannot build matrix: {e}")))
    }

    /// Shape as a vector of dimension lengths.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Vector(v) => vec![v.len()],
            Self::Matrix(m) => vec![m.nrows(), m.ncols()],
        }
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        match self {
            Self::Vector(_) => 1,
            Self::Matrix(_) => 2,
        }
    }

    /// Number of rows (samples).
    pub fn n_rows(&self) -> usize {
        match self {
            Self::Vector(v) => v.len(),
            Self::Matrix(m) => m.nrows(),
        }
    }

    /// Number of columns; 1 for vectors.
    pub fn n_cols(&self) -> usize {
        match self {
            Self::Vector(_) => 1,
            Self::Matrix(m) => m.ncols(),
        }
    }

    /// Whether any element is NaN.
    pub fn has_nan(&self) -> bool {
        match self {
            Self::Vector(v) => v.iter().any(|x| x.is_nan()),
            Self::Matrix(m) => m.iter().any(|x| x.is_nan()),
        }
    }

    /// Whether row `i` holds a NaN.
    pub fn row_has_nan(&self, i: usize) -> bool {
        match self {
            Self::Vector(v) => v[i].is_nan(),
            Self::Matrix(m) => m.row(i).iter().any(|x| x.is_nan()),
        }
    }

    /// Copy of the given rows, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        match self {
            Self::Vector(v) => Self::Vector(v.select(Axis(0), rows)),
            Self::Matrix(m) => Self::Matrix(m.select(Axis(0), rows)),
        }
    }

    pub fn as_vector(&self) -> Option<&Array1<f64>> {
        match self {
            Self::Vector(v) => Some(v),
            Self::Matrix(_) => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Array2<f64>> {
        match self {
            Self::Vector(_) => None,
            Self::Matrix(m) => Some(m),
        }
    }

    /// Column `j` as a view; a vector only has column 0.
    pub fn column(&self, j: usize) -> Option<ArrayView1<'_, f64>> {
        match self {
            Self::Vector(v) if j == 0 => Some(v.view()),
            Self::Vector(_) => None,
            Self::Matrix(m) if j < m.ncols() => Some(m.column(j)),
            Self::Matrix(_) => None,
        }
    }

    /// Iterate over all elements in row-major order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            Self::Vector(v) => Box::new(v.iter().copied()),
            Self::Matrix(m) => Box::new(m.iter().copied()),
        }
    }

    /// Structural equality; with `equal_nan` two NaNs in the same position compare equal.
    pub fn equal(&self, other: &Self, equal_nan: bool) -> bool {
        self.shape() == other.shape()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| elements_equal(a, b, equal_nan))
    }
}

/// Element comparison honoring the NaN-equality flag.
pub fn elements_equal(a: f64, b: f64, equal_nan: bool) -> bool {
    a == b || (equal_nan && a.is_nan() && b.is_nan())
}

impl From<Vec<f64>> for Values {
    fn from(values: Vec<f64>) -> Self {
        Self::vector(values)
    }
}

impl From<&[f64]> for Values {
    fn from(values: &[f64]) -> Self {
        Self::vector(values.to_vec())
    }
}

impl From<Array1<f64>> for Values {
    fn from(values: Array1<f64>) -> Self {
        Self::Vector(values)
    }
}

impl From<Array2<f64>> for Values {
    fn from(values: Array2<f64>) -> Self {
        Self::Matrix(values)
    }
}
