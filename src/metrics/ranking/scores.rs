//! Average precision and ROC AUC

use super::curve::{average_precision_of, has_both_classes, roc_auc_of};
use crate::config::MetricOptions;
use crate::data::Values;
use crate::error::{Error, Result};
use crate::metrics::classification::is_positive;
use crate::metrics::common::{nan_mean, nan_weighted_mean, prepare_labeled};
use crate::metrics::map::MetricMap;
use crate::policy::LabelType;

/// Binary labels and scores, one entry per class.
pub(crate) struct ScoreColumns {
    pub labels: Vec<Vec<bool>>,
    pub scores: Vec<Vec<f64>>,
    /// Class labels (multiclass) or column indices (multilabel)
    pub classes: Vec<f64>,
}

impl ScoreColumns {
    /// Split a NaN-free label/score pair into one-vs-rest columns.
    ///
    /// - binary: `y_score` is a vector, or an `(n, 2)` matrix whose column 1 scores
    ///   the positive class
    /// - multiclass: `y_score` is `(n, k)`; column `j` scores label `j`
    /// - multilabel: indicator and score matrices of equal shape
    pub fn from_values(label_type: LabelType, y_true: &Values, y_score: &Values) -> Result<Self> {
        match (label_type, y_true, y_score) {
            (LabelType::Binary, Values::Vector(t), _) => {
                let scores = match y_score {
                    Values::Vector(s) => s.to_vec(),
                    Values::Matrix(s) if s.ncols() == 2 => s.column(1).to_vec(),
                    Values::Matrix(s) => {
                        return Err(Error::InvalidInput(format!(
                            "binary scores must be a vector or have 2 columns, got {}",
                            s.ncols()
                        )))
                    }
                };
                Ok(Self {
                    labels: vec![t.iter().map(|&v| is_positive(v)).collect()],
                    scores: vec![scores],
                    classes: vec![1.0],
                })
            }
            (LabelType::Multiclass, Values::Vector(t), Values::Matrix(s)) => {
                let k = s.ncols();
                if let Some(bad) = t
                    .iter()
                    .find(|&&v| v.fract() != 0.0 || v < 0.0 || v >= k as f64)
                {
                    return Err(Error::InvalidInput(format!(
                        "class label {bad} cannot index a score matrix with {k} columns"
                    )));
                }
                Ok(Self {
                    labels: (0..k)
                        .map(|j| t.iter().map(|&v| v == j as f64).collect())
                        .collect(),
                    scores: (0..k).map(|j| s.column(j).to_vec()).collect(),
                    classes: (0..k).map(|j| j as f64).collect(),
                })
            }
            (LabelType::Multilabel, Values::Matrix(t), Values::Matrix(s)) => {
                let k = t.ncols();
                Ok(Self {
                    labels: (0..k)
                        .map(|j| t.column(j).iter().map(|&v| is_positive(v)).collect())
                        .collect(),
                    scores: (0..k).map(|j| s.column(j).to_vec()).collect(),
                    classes: (0..k).map(|j| j as f64).collect(),
                })
            }
            _ => Err(Error::InvalidInput(format!(
                "{label_type} scores cannot be paired with shapes {:?} and {:?}",
                y_true.shape(),
                y_score.shape()
            ))),
        }
    }

    /// Positives per class
    pub fn supports(&self) -> Vec<f64> {
        self.labels
            .iter()
            .map(|l| l.iter().filter(|&&x| x).count() as f64)
            .collect()
    }

    /// One-hot labels against scores, flattened over every class
    pub fn flattened(&self) -> (Vec<bool>, Vec<f64>) {
        (
            self.labels.iter().flatten().copied().collect(),
            self.scores.iter().flatten().copied().collect(),
        )
    }
}

fn ranking_family(
    family: &'static str,
    y_true: &Values,
    y_score: &Values,
    options: &MetricOptions,
    score: fn(&[bool], &[f64]) -> f64,
) -> Result<MetricMap> {
    let (prepared, label_type) = prepare_labeled(family, y_true, y_score, options)?;
    let columns = ScoreColumns::from_values(label_type, &prepared.y_true, &prepared.y_pred)?;

    let undefined = columns.labels.iter().filter(|l| !has_both_classes(l)).count();
    if undefined > 0 && !prepared.is_empty() {
        tracing::warn!(
            family,
            classes = undefined,
            "classes without both positive and negative samples score NaN"
        );
    }

    let supports = columns.supports();
    let mut map = MetricMap::new();
    match label_type {
        LabelType::Binary => {
            map.insert(family, score(&columns.labels[0], &columns.scores[0]));
            map.insert("support", supports[0]);
        }
        LabelType::Multiclass | LabelType::Multilabel => {
            let per_class: Vec<f64> = columns
                .labels
                .iter()
                .zip(&columns.scores)
                .map(|(l, s)| score(l, s))
                .collect();
            let (flat_labels, flat_scores) = columns.flattened();

            map.insert(family, per_class.clone());
            map.insert(format!("{family}_macro"), nan_mean(&per_class));
            map.insert(format!("{family}_micro"), score(&flat_labels, &flat_scores));
            map.insert(
                format!("{family}_weighted"),
                nan_weighted_mean(&per_class, &supports),
            );
            map.insert("support", supports);
            if label_type == LabelType::Multiclass {
                map.insert("labels", columns.classes.clone());
            }
        }
    }
    map.insert("count", prepared.count());

    Ok(prepared.finish(map, options))
}

/// Average precision: `sum((R_n - R_{n-1}) * P_n)` over decreasing thresholds.
///
/// Binary input gives a scalar; multiclass and multilabel input give a per-class
/// vector plus `_macro`, `_micro` and `_weighted` averages. Classes lacking either
/// positives or negatives score NaN and are left out of the averages.
///
/// # Example
/// ```
/// use metrica::{average_precision, MetricOptions, Values};
///
/// let y_true = Values::vector(vec![0.0, 0.0, 1.0, 1.0]);
/// let y_score = Values::vector(vec![0.1, 0.4, 0.35, 0.8]);
/// let m = average_precision(&y_true, &y_score, &MetricOptions::default()).unwrap();
/// assert!((m.scalar("average_precision").unwrap() - 0.8333333333333333).abs() < 1e-12);
/// ```
pub fn average_precision(
    y_true: &Values,
    y_score: &Values,
    options: &MetricOptions,
) -> Result<MetricMap> {
    ranking_family("average_precision", y_true, y_score, options, average_precision_of)
}

/// Area under the ROC curve. Same layout as [`average_precision`], key `roc_auc`.
pub fn roc_auc(y_true: &Values, y_score: &Values, options: &MetricOptions) -> Result<MetricMap> {
    ranking_family("roc_auc", y_true, y_score, options, roc_auc_of)
}
