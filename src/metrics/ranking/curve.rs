//! ROC and precision-recall curves over binary labels and scores

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// ROC curve points, ordered by decreasing threshold from (0, 0) to (1, 1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    /// False positive rate: FP / (FP + TN)
    pub fpr: Vec<f64>,
    /// True positive rate: TP / (TP + FN)
    pub tpr: Vec<f64>,
    /// Score threshold per point; the first is `+inf`
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    /// Area under the curve (trapezoidal rule). NaN when a class is missing.
    pub fn auc(&self) -> f64 {
        trapezoidal_auc(&self.fpr, &self.tpr)
    }
}

/// Precision-recall curve points, ordered by decreasing threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRecallCurve {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub thresholds: Vec<f64>,
}

impl PrecisionRecallCurve {
    /// Step-wise area: `sum((R_n - R_{n-1}) * P_n)`
    pub fn average_precision(&self) -> f64 {
        self.recall
            .windows(2)
            .zip(self.precision.iter().skip(1))
            .map(|(r, p)| (r[1] - r[0]) * p)
            .sum()
    }
}

/// Cumulative (threshold, tp, fp) at each distinct score, highest score first.
fn threshold_counts(labels: &[bool], scores: &[f64]) -> Result<Vec<(f64, usize, usize)>> {
    if labels.len() != scores.len() {
        return Err(Error::ShapeMismatch {
            y_true: vec![labels.len()],
            y_pred: vec![scores.len()],
        });
    }

    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut points = Vec::new();
    let (mut tp, mut fp) = (0usize, 0usize);
    let mut i = 0;
    while i < indices.len() {
        // Accumulate all samples with the same score
        let current = scores[indices[i]];
        while i < indices.len() && scores[indices[i]] == current {
            if labels[indices[i]] {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        points.push((current, tp, fp));
    }
    Ok(points)
}

/// Compute the ROC curve from binary labels and scores.
///
/// Tied scores form a single point. With no positives (or no negatives) the
/// corresponding rate is NaN throughout.
pub fn roc_curve(labels: &[bool], scores: &[f64]) -> Result<RocCurve> {
    let counts = threshold_counts(labels, scores)?;
    let positives = labels.iter().filter(|&&l| l).count() as f64;
    let negatives = labels.len() as f64 - positives;
    let rate = |k: usize, total: f64| if total == 0.0 { f64::NAN } else { k as f64 / total };

    let mut curve = RocCurve {
        fpr: vec![rate(0, negatives)],
        tpr: vec![rate(0, positives)],
        thresholds: vec![f64::INFINITY],
    };
    for (threshold, tp, fp) in counts {
        curve.fpr.push(rate(fp, negatives));
        curve.tpr.push(rate(tp, positives));
        curve.thresholds.push(threshold);
    }
    Ok(curve)
}

/// Compute the precision-recall curve from binary labels and scores.
///
/// Starts at recall 0 / precision 1. Recall is NaN when there are no positives.
pub fn precision_recall_curve(labels: &[bool], scores: &[f64]) -> Result<PrecisionRecallCurve> {
    let counts = threshold_counts(labels, scores)?;
    let positives = labels.iter().filter(|&&l| l).count() as f64;

    let mut curve = PrecisionRecallCurve {
        precision: vec![1.0],
        recall: vec![if positives == 0.0 { f64::NAN } else { 0.0 }],
        thresholds: vec![f64::INFINITY],
    };
    for (threshold, tp, fp) in counts {
        curve.precision.push(tp as f64 / (tp + fp) as f64);
        curve.recall.push(if positives == 0.0 {
            f64::NAN
        } else {
            tp as f64 / positives
        });
        curve.thresholds.push(threshold);
    }
    Ok(curve)
}

/// True when both classes are present, so ranking scores are defined.
pub(crate) fn has_both_classes(labels: &[bool]) -> bool {
    labels.iter().any(|&l| l) && labels.iter().any(|&l| !l)
}

/// ROC AUC of one class; NaN unless both classes are present.
pub(crate) fn roc_auc_of(labels: &[bool], scores: &[f64]) -> f64 {
    if !has_both_classes(labels) {
        return f64::NAN;
    }
    roc_curve(labels, scores).map_or(f64::NAN, |c| c.auc())
}

/// Average precision of one class; NaN unless both classes are present.
pub(crate) fn average_precision_of(labels: &[bool], scores: &[f64]) -> f64 {
    if !has_both_classes(labels) {
        return f64::NAN;
    }
    precision_recall_curve(labels, scores).map_or(f64::NAN, |c| c.average_precision())
}

/// Trapezoidal AUC: sum of trapezoids between consecutive (x, y) points.
fn trapezoidal_auc(x: &[f64], y: &[f64]) -> f64 {
    let mut auc = 0.0;
    for i in 1..x.len() {
        auc += (x[i] - x[i - 1]).abs() * (y[i] + y[i - 1]) / 2.0;
    }
    auc
}
