//! One-vs-rest outcome counts per class

use super::confusion::ConfusionMatrix;
use crate::data::Values;
use crate::error::{Error, Result};
use crate::policy::LabelType;

/// Outcome counts for one class treated as the positive class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BinaryCounts {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    pub fn_: usize,
}

impl BinaryCounts {
    /// Count outcomes from `(is_true_positive_class, is_predicted_positive_class)` pairs.
    pub fn from_outcomes(outcomes: impl Iterator<Item = (bool, bool)>) -> Self {
        let mut counts = Self::default();
        for (actual, predicted) in outcomes {
            match (actual, predicted) {
                (true, true) => counts.tp += 1,
                (false, true) => counts.fp += 1,
                (false, false) => counts.tn += 1,
                (true, false) => counts.fn_ += 1,
            }
        }
        counts
    }

    /// Number of true instances of the class
    pub fn support(&self) -> usize {
        self.tp + self.fn_
    }

    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }

    fn add(self, other: Self) -> Self {
        Self {
            tp: self.tp + other.tp,
            fp: self.fp + other.fp,
            tn: self.tn + other.tn,
            fn_: self.fn_ + other.fn_,
        }
    }
}

/// Positive-class test for binary labels and indicator matrices
pub(crate) fn is_positive(value: f64) -> bool {
    value == 1.0
}

/// Reject values outside {0, 1} where binary labels or indicators are expected.
///
/// Multiclass labels pass through.
pub(crate) fn require_indicator_values(
    label_type: LabelType,
    y_true: &Values,
    y_pred: &Values,
) -> Result<()> {
    if label_type == LabelType::Multiclass {
        return Ok(());
    }
    for (name, values) in [("y_true", y_true), ("y_pred", y_pred)] {
        if let Some(bad) = values.iter().find(|&v| v != 0.0 && v != 1.0) {
            return Err(Error::InvalidInput(format!(
                "{label_type} labels must be 0 or 1, {name} contains {bad}"
            )));
        }
    }
    Ok(())
}

/// Per-class counts for one label type.
#[derive(Clone, Debug)]
pub struct ClassCounts {
    pub label_type: LabelType,
    /// Class labels (multiclass) or column indices (multilabel); `[1.0]` for binary
    pub labels: Vec<f64>,
    pub per_class: Vec<BinaryCounts>,
    /// Rows counted
    pub n_samples: usize,
    /// Full matrix, multiclass only
    pub confusion: Option<ConfusionMatrix>,
}

impl ClassCounts {
    /// Build counts from NaN-free label arrays.
    pub fn from_labels(label_type: LabelType, y_true: &Values, y_pred: &Values) -> Result<Self> {
        require_indicator_values(label_type, y_true, y_pred)?;
        match (label_type, y_true, y_pred) {
            (LabelType::Binary, Values::Vector(t), Values::Vector(p)) => {
                let counts = BinaryCounts::from_outcomes(
                    t.iter().zip(p.iter()).map(|(&a, &b)| (is_positive(a), is_positive(b))),
                );
                Ok(Self {
                    label_type,
                    labels: vec![1.0],
                    per_class: vec![counts],
                    n_samples: t.len(),
                    confusion: None,
                })
            }
            (LabelType::Multiclass, Values::Vector(t), Values::Vector(p)) => {
                let cm = ConfusionMatrix::from_predictions(&t.to_vec(), &p.to_vec());
                let per_class = (0..cm.n_classes())
                    .map(|c| BinaryCounts {
                        tp: cm.true_positives(c),
                        fp: cm.false_positives(c),
                        tn: cm.true_negatives(c),
                        fn_: cm.false_negatives(c),
                    })
                    .collect();
                Ok(Self {
                    label_type,
                    labels: cm.labels().to_vec(),
                    per_class,
                    n_samples: t.len(),
                    confusion: Some(cm),
                })
            }
            (LabelType::Multilabel, Values::Matrix(t), Values::Matrix(p)) => {
                let per_class = (0..t.ncols())
                    .map(|j| {
                        BinaryCounts::from_outcomes(
                            t.column(j)
                                .iter()
                                .zip(p.column(j).iter())
                                .map(|(&a, &b)| (is_positive(a), is_positive(b))),
                        )
                    })
                    .collect();
                Ok(Self {
                    label_type,
                    labels: (0..t.ncols()).map(|j| j as f64).collect(),
                    per_class,
                    n_samples: t.nrows(),
                    confusion: None,
                })
            }
            _ => Err(Error::InvalidInput(format!(
                "{label_type} labels cannot be paired with shapes {:?} and {:?}",
                y_true.shape(),
                y_pred.shape()
            ))),
        }
    }

    /// Counts summed over classes (micro view)
    pub fn summed(&self) -> BinaryCounts {
        self.per_class
            .iter()
            .fold(BinaryCounts::default(), |acc, c| acc.add(*c))
    }

    /// Support per class as floats
    pub fn supports(&self) -> Vec<f64> {
        self.per_class.iter().map(|c| c.support() as f64).collect()
    }

    /// Apply a per-class formula
    pub fn per_class_values(&self, f: impl Fn(&BinaryCounts) -> f64) -> Vec<f64> {
        self.per_class.iter().map(f).collect()
    }

    /// The single positive-class counts of a binary problem
    pub fn binary(&self) -> BinaryCounts {
        self.per_class.first().copied().unwrap_or_default()
    }
}
