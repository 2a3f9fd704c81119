//! Row-aligned pairs of ground truth and predictions

use super::values::Values;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Ground truth with predictions (or scores), aligned by row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrayPair {
    y_true: Values,
    y_pred: Values,
}

impl ArrayPair {
    /// Pair two arrays after checking their shapes.
    pub fn new(y_true: Values, y_pred: Values) -> Result<Self> {
        check_shapes(&y_true, &y_pred)?;
        Ok(Self { y_true, y_pred })
    }

    pub fn y_true(&self) -> &Values {
        &self.y_true
    }

    pub fn y_pred(&self) -> &Values {
        &self.y_pred
    }

    /// Number of samples.
    pub fn n_rows(&self) -> usize {
        self.y_true.n_rows()
    }

    /// Split back into `(y_true, y_pred)`.
    pub fn into_parts(self) -> (Values, Values) {
        (self.y_true, self.y_pred)
    }

    /// Rows where neither array holds a NaN, in order.
    pub fn complete_rows(&self) -> Vec<usize> {
        (0..self.n_rows())
            .filter(|&i| !self.y_true.row_has_nan(i) && !self.y_pred.row_has_nan(i))
            .collect()
    }

    /// Copy of the pair restricted to the given rows.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            y_true: self.y_true.select_rows(rows),
            y_pred: self.y_pred.select_rows(rows),
        }
    }

    pub fn equal(&self, other: &Self, equal_nan: bool) -> bool {
        self.y_true.equal(&other.y_true, equal_nan) && self.y_pred.equal(&other.y_pred, equal_nan)
    }
}

/// Validate that two arrays can be paired row by row.
///
/// Shapes must match exactly, except that a rank-1 `y_true` may be paired with
/// an `(n, k)` score matrix holding the same number of rows.
pub fn check_shapes(y_true: &Values, y_pred: &Values) -> Result<()> {
    let compatible = match (y_true, y_pred) {
        (Values::Vector(t), Values::Matrix(p)) => t.len() == p.nrows(),
        _ => y_true.shape() == y_pred.shape(),
    };
    if compatible {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            y_true: y_true.shape(),
            y_pred: y_pred.shape(),
        })
    }
}
