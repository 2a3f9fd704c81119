//! Jaccard similarity

use super::counts::BinaryCounts;
use super::family::score_family;
use crate::config::MetricOptions;
use crate::data::Values;
use crate::error::Result;
use crate::metrics::common::zero_div;
use crate::metrics::map::MetricMap;

fn jaccard_of(c: &BinaryCounts) -> f64 {
    zero_div(c.tp as f64, (c.tp + c.fp + c.fn_) as f64)
}

/// Jaccard index `tp / (tp + fp + fn)` under key `jaccard`.
///
/// Layout follows [`super::precision`].
pub fn jaccard_score(y_true: &Values, y_pred: &Values, options: &MetricOptions) -> Result<MetricMap> {
    score_family("jaccard", y_true, y_pred, options, &[("jaccard", &jaccard_of)])
}
