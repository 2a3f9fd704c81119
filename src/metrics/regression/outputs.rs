//! Per-output dispatch for single- and multi-output regression

use crate::error::Result;
use crate::metrics::common::{ratio, Prepared};
use crate::metrics::map::MetricMap;
use ndarray::ArrayView1;

/// A score over one output column: `(y_true, y_pred) -> value`
pub(crate) type OutputScore = dyn Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> Result<f64>;

/// Insert `name` as a scalar for vector input, or as a per-output vector plus
/// `<name>_mean` for matrix input.
pub(crate) fn insert_per_output(
    map: &mut MetricMap,
    name: &str,
    prepared: &Prepared,
    score: &OutputScore,
) -> Result<()> {
    let n_outputs = prepared.y_true.n_cols();
    let mut values = Vec::with_capacity(n_outputs);
    for j in 0..n_outputs {
        if let (Some(t), Some(p)) = (prepared.y_true.column(j), prepared.y_pred.column(j)) {
            values.push(score(t, p)?);
        }
    }

    if prepared.y_true.ndim() == 1 {
        map.insert(name, values.first().copied().unwrap_or(f64::NAN));
    } else {
        let mean = ratio(values.iter().sum(), values.len() as f64);
        map.insert(name, values);
        map.insert(format!("{name}_mean"), mean);
    }
    Ok(())
}

/// Mean of a view; NaN when empty.
pub(crate) fn mean(values: ArrayView1<'_, f64>) -> f64 {
    ratio(values.sum(), values.len() as f64)
}
