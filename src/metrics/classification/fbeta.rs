//! Precision, recall and F-beta

use super::counts::BinaryCounts;
use super::family::score_family;
use crate::config::{validate_beta, MetricOptions};
use crate::data::Values;
use crate::error::Result;
use crate::metrics::common::zero_div;
use crate::metrics::map::MetricMap;

pub(crate) fn precision_of(c: &BinaryCounts) -> f64 {
    zero_div(c.tp as f64, (c.tp + c.fp) as f64)
}

pub(crate) fn recall_of(c: &BinaryCounts) -> f64 {
    zero_div(c.tp as f64, (c.tp + c.fn_) as f64)
}

/// F-beta from counts: `(1 + b²)·tp / ((1 + b²)·tp + b²·fn + fp)`
pub(crate) fn fbeta_of(c: &BinaryCounts, beta: f64) -> f64 {
    let b2 = beta * beta;
    let tp = c.tp as f64;
    zero_div((1.0 + b2) * tp, (1.0 + b2) * tp + b2 * c.fn_ as f64 + c.fp as f64)
}

/// Precision: `tp / (tp + fp)`.
///
/// Keys: `precision` (plus `_macro`/`_micro`/`_weighted` for multiclass and
/// multilabel), `support`, `labels` (multiclass), `count`.
pub fn precision(y_true: &Values, y_pred: &Values, options: &MetricOptions) -> Result<MetricMap> {
    score_family("precision", y_true, y_pred, options, &[("precision", &precision_of)])
}

/// Recall: `tp / (tp + fn)`. Same layout as [`precision`].
pub fn recall(y_true: &Values, y_pred: &Values, options: &MetricOptions) -> Result<MetricMap> {
    score_family("recall", y_true, y_pred, options, &[("recall", &recall_of)])
}

/// F-beta score under key `fbeta`. `beta` must be positive.
pub fn fbeta_score(
    y_true: &Values,
    y_pred: &Values,
    beta: f64,
    options: &MetricOptions,
) -> Result<MetricMap> {
    validate_beta(beta)?;
    let fbeta = move |c: &BinaryCounts| fbeta_of(c, beta);
    score_family("fbeta", y_true, y_pred, options, &[("fbeta", &fbeta)])
}

/// F1 score under key `f1`.
pub fn f1_score(y_true: &Values, y_pred: &Values, options: &MetricOptions) -> Result<MetricMap> {
    let f1 = |c: &BinaryCounts| fbeta_of(c, 1.0);
    score_family("f1", y_true, y_pred, options, &[("f1", &f1)])
}

/// Precision, recall and F-beta in one mapping.
pub fn precision_recall_fbeta(
    y_true: &Values,
    y_pred: &Values,
    beta: f64,
    options: &MetricOptions,
) -> Result<MetricMap> {
    validate_beta(beta)?;
    let fbeta = move |c: &BinaryCounts| fbeta_of(c, beta);
    score_family(
        "precision_recall_fbeta",
        y_true,
        y_pred,
        options,
        &[
            ("precision", &precision_of),
            ("recall", &recall_of),
            ("fbeta", &fbeta),
        ],
    )
}
