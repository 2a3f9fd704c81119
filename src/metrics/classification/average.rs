//! Averaging strategies for multi-class metrics

use super::counts::ClassCounts;
use crate::metrics::common::zero_div;

/// Averaging strategy for multi-class and multilabel metrics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Average {
    /// Calculate metrics for each label, return unweighted mean
    Macro,
    /// Calculate metrics globally by counting total TP, FP, FN
    Micro,
    /// Weighted mean by support (number of true instances per label)
    Weighted,
}

impl Average {
    pub const ALL: [Average; 3] = [Average::Macro, Average::Micro, Average::Weighted];

    /// Key suffix, e.g. `precision_macro`
    pub fn suffix(&self) -> &'static str {
        match self {
            Average::Macro => "macro",
            Average::Micro => "micro",
            Average::Weighted => "weighted",
        }
    }

    /// Aggregate per-class values.
    ///
    /// `micro` is the metric recomputed on summed counts and is passed in by the caller.
    /// Empty input yields NaN; a zero total support with samples present yields 0.
    pub fn apply(&self, per_class: &[f64], counts: &ClassCounts, micro: f64) -> f64 {
        if counts.n_samples == 0 {
            return f64::NAN;
        }
        match self {
            Average::Macro => {
                if per_class.is_empty() {
                    f64::NAN
                } else {
                    per_class.iter().sum::<f64>() / per_class.len() as f64
                }
            }
            Average::Micro => micro,
            Average::Weighted => {
                let supports = counts.supports();
                let total: f64 = supports.iter().sum();
                let weighted: f64 = per_class.iter().zip(&supports).map(|(v, s)| v * s).sum();
                zero_div(weighted, total)
            }
        }
    }
}
