//! Accuracy, balanced accuracy and Matthews correlation

use super::counts::{require_indicator_values, ClassCounts};
use super::fbeta::recall_of;
use crate::config::MetricOptions;
use crate::data::Values;
use crate::error::{Error, Result};
use crate::metrics::common::{prepare_labeled, ratio, require_label_predictions, zero_div};
use crate::metrics::map::MetricMap;
use crate::policy::LabelType;

/// Fraction of correctly predicted samples.
///
/// Keys: `accuracy, count, count_correct, count_incorrect, error`. Multilabel input
/// uses exact-row matching and adds `hamming_loss`. Empty input gives NaN
/// accuracy/error and zero counts.
///
/// # Example
/// ```
/// use metrica::{accuracy, MetricOptions, Values};
///
/// let y = Values::vector(vec![1.0, 0.0, 0.0, 1.0, 1.0]);
/// let m = accuracy(&y, &y, &MetricOptions::default()).unwrap();
/// assert_eq!(m.scalar("accuracy"), Some(1.0));
/// assert_eq!(m.scalar("count"), Some(5.0));
/// ```
pub fn accuracy(y_true: &Values, y_pred: &Values, options: &MetricOptions) -> Result<MetricMap> {
    require_label_predictions("accuracy", y_true, y_pred)?;
    let (prepared, label_type) = prepare_labeled("accuracy", y_true, y_pred, options)?;
    require_indicator_values(label_type, &prepared.y_true, &prepared.y_pred)?;
    let count = prepared.count();

    let (correct, hamming) = match (&prepared.y_true, &prepared.y_pred) {
        (Values::Vector(t), Values::Vector(p)) => {
            (t.iter().zip(p.iter()).filter(|(a, b)| a == b).count(), None)
        }
        (Values::Matrix(t), Values::Matrix(p)) => {
            let correct = t
                .rows()
                .into_iter()
                .zip(p.rows())
                .filter(|(a, b)| a == b)
                .count();
            let mismatched = t.iter().zip(p.iter()).filter(|(a, b)| a != b).count();
            (correct, Some(ratio(mismatched as f64, t.len() as f64)))
        }
        _ => {
            return Err(Error::InvalidInput(format!(
                "accuracy cannot pair {label_type} inputs of shapes {:?} and {:?}",
                prepared.y_true.shape(),
                prepared.y_pred.shape()
            )))
        }
    };

    let accuracy = ratio(correct as f64, count as f64);
    let mut map = MetricMap::new();
    map.insert("accuracy", accuracy);
    map.insert("count", count);
    map.insert("count_correct", correct);
    map.insert("count_incorrect", count - correct);
    map.insert("error", 1.0 - accuracy);
    if let Some(hamming) = hamming {
        map.insert("hamming_loss", hamming);
    }

    Ok(prepared.finish(map, options))
}

/// Mean per-class recall. Binary input averages the recall of both classes.
///
/// Keys: `balanced_accuracy, count`. Multilabel input is rejected.
pub fn balanced_accuracy(
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
) -> Result<MetricMap> {
    require_label_predictions("balanced_accuracy", y_true, y_pred)?;
    let (prepared, label_type) = prepare_labeled("balanced_accuracy", y_true, y_pred, options)?;
    if label_type == LabelType::Multilabel {
        return Err(Error::InvalidInput(
            "balanced_accuracy does not support multilabel input".into(),
        ));
    }
    // Binary is scored as two classes so both recalls contribute
    let counts = ClassCounts::from_labels(LabelType::Multiclass, &prepared.y_true, &prepared.y_pred)?;

    let recalls: Vec<f64> = counts
        .per_class
        .iter()
        .filter(|c| c.support() > 0)
        .map(recall_of)
        .collect();
    let score = if recalls.is_empty() {
        f64::NAN
    } else {
        recalls.iter().sum::<f64>() / recalls.len() as f64
    };

    let mut map = MetricMap::new();
    map.insert("balanced_accuracy", score);
    map.insert("count", counts.n_samples);
    Ok(prepared.finish(map, options))
}

/// Matthews correlation coefficient over the full confusion matrix.
///
/// Keys: `matthews_corrcoef, count`. A zero denominator yields 0, empty input NaN.
pub fn matthews_corrcoef(
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
) -> Result<MetricMap> {
    require_label_predictions("matthews_corrcoef", y_true, y_pred)?;
    let (prepared, label_type) = prepare_labeled("matthews_corrcoef", y_true, y_pred, options)?;
    if label_type == LabelType::Multilabel {
        return Err(Error::InvalidInput(
            "matthews_corrcoef does not support multilabel input".into(),
        ));
    }
    let counts = ClassCounts::from_labels(LabelType::Multiclass, &prepared.y_true, &prepared.y_pred)?;

    let score = match &counts.confusion {
        Some(cm) if cm.total() > 0 => {
            let k = cm.n_classes();
            let s = cm.total() as f64;
            let c = cm.correct() as f64;
            let t: Vec<f64> = (0..k).map(|i| cm.support(i) as f64).collect();
            let p: Vec<f64> = (0..k)
                .map(|j| (0..k).map(|i| cm.get(i, j)).sum::<usize>() as f64)
                .collect();
            let tp_sum: f64 = t.iter().zip(&p).map(|(a, b)| a * b).sum();
            let num = c * s - tp_sum;
            let den = ((s * s - p.iter().map(|x| x * x).sum::<f64>())
                * (s * s - t.iter().map(|x| x * x).sum::<f64>()))
            .sqrt();
            zero_div(num, den)
        }
        _ => f64::NAN,
    };

    let mut map = MetricMap::new();
    map.insert("matthews_corrcoef", score);
    map.insert("count", counts.n_samples);
    Ok(prepared.finish(map, options))
}
