//! Shared entry and exit steps for metric functions
//!
//! Every metric function runs, in order: shape check, label-type resolution,
//! NaN policy, computation, then key formatting. Under `propagate` the
//! computation sees only complete rows so the key set is known, and `finish`
//! then turns every value except `"count"` and `"labels"` into NaN.

use super::map::MetricMap;
use crate::config::MetricOptions;
use crate::data::{check_shapes, ArrayPair, Values};
use crate::error::{Error, Result};
use crate::policy::{LabelType, NanPolicy};

/// Inputs after validation and NaN handling.
pub(crate) struct Prepared {
    pub y_true: Values,
    pub y_pred: Values,
    contains_nan: bool,
    n_input: usize,
    nan_policy: NanPolicy,
}

impl Prepared {
    /// Effective sample count after filtering.
    pub fn count(&self) -> usize {
        self.y_true.n_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Apply NaN propagation and key affixes.
    pub fn finish(&self, mut map: MetricMap, options: &MetricOptions) -> MetricMap {
        if self.contains_nan && self.nan_policy == NanPolicy::Propagate {
            map.poison(self.n_input);
        }
        map.with_affixes(&options.prefix, &options.suffix)
    }
}

/// Validate inputs, resolve the label type, then apply the NaN policy.
pub(crate) fn prepare_labeled(
    family: &'static str,
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
) -> Result<(Prepared, LabelType)> {
    check_shapes(y_true, y_pred)?;
    let label_type = options.label_type.resolve(y_true)?;
    let prepared = filter(family, y_true, y_pred, options.nan_policy)?;
    tracing::debug!(
        family,
        %label_type,
        rows = prepared.count(),
        "computing metric"
    );
    Ok((prepared, label_type))
}

/// Validate inputs of identical shape, then apply the NaN policy.
pub(crate) fn prepare_same_shape(
    family: &'static str,
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
) -> Result<Prepared> {
    if y_true.shape() != y_pred.shape() {
        return Err(Error::ShapeMismatch {
            y_true: y_true.shape(),
            y_pred: y_pred.shape(),
        });
    }
    let prepared = filter(family, y_true, y_pred, options.nan_policy)?;
    tracing::debug!(family, rows = prepared.count(), "computing metric");
    Ok(prepared)
}

fn filter(
    family: &'static str,
    y_true: &Values,
    y_pred: &Values,
    nan_policy: NanPolicy,
) -> Result<Prepared> {
    let pair = ArrayPair::new(y_true.clone(), y_pred.clone())?;
    let n_input = pair.n_rows();
    let (pair, contains_nan) = nan_policy.apply(pair)?;
    let pair = if contains_nan && nan_policy == NanPolicy::Propagate {
        tracing::debug!(family, "NaN present, values will propagate as NaN");
        pair.select_rows(&pair.complete_rows())
    } else {
        pair
    };
    if pair.n_rows() == 0 {
        tracing::warn!(family, "no rows to compute on, ratio metrics are NaN");
    }
    let (y_true, y_pred) = pair.into_parts();
    Ok(Prepared {
        y_true,
        y_pred,
        contains_nan,
        n_input,
        nan_policy,
    })
}

/// `num / den`, NaN when the denominator is zero.
pub(crate) fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        f64::NAN
    } else {
        num / den
    }
}

/// `num / den`, zero when the denominator is zero.
pub(crate) fn zero_div(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Mean ignoring NaN; NaN when nothing remains.
pub(crate) fn nan_mean(values: &[f64]) -> f64 {
    let kept: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if kept.is_empty() {
        f64::NAN
    } else {
        kept.iter().sum::<f64>() / kept.len() as f64
    }
}

/// Weighted mean ignoring NaN values and their weights; NaN when no weight remains.
pub(crate) fn nan_weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    let (num, den) = values
        .iter()
        .zip(weights)
        .filter(|(v, _)| !v.is_nan())
        .fold((0.0, 0.0), |(n, d), (&v, &w)| (n + v * w, d + w));
    ratio(num, den)
}

/// Reject a score matrix where predicted labels are expected.
///
/// A vector `y_true` must be paired with a vector `y_pred`; multilabel indicator
/// matrices on both sides are fine.
pub(crate) fn require_label_predictions(family: &str, y_true: &Values, y_pred: &Values) -> Result<()> {
    if y_true.ndim() == 1 && y_pred.ndim() == 2 {
        return Err(Error::InvalidInput(format!(
            "{family} expects predicted labels, got a score matrix of shape {:?}",
            y_pred.shape()
        )));
    }
    Ok(())
}
