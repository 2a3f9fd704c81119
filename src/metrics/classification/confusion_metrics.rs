//! Confusion-matrix counts and rates

use super::counts::{BinaryCounts, ClassCounts};
use crate::config::MetricOptions;
use crate::data::Values;
use crate::error::Result;
use crate::metrics::common::{prepare_labeled, ratio, require_label_predictions};
use crate::metrics::map::MetricMap;
use crate::policy::LabelType;
use ndarray::{arr2, Array2};

const COUNT_KEYS: [&str; 4] = [
    "true_positive",
    "false_positive",
    "true_negative",
    "false_negative",
];

const RATE_KEYS: [&str; 4] = ["tpr", "fpr", "tnr", "fnr"];

fn count_fields(c: &BinaryCounts) -> [f64; 4] {
    [c.tp as f64, c.fp as f64, c.tn as f64, c.fn_ as f64]
}

/// True/false positive/negative rates; NaN when a denominator is zero.
fn rate_fields(c: &BinaryCounts) -> [f64; 4] {
    let (tp, fp, tn, fn_) = (c.tp as f64, c.fp as f64, c.tn as f64, c.fn_ as f64);
    [
        ratio(tp, tp + fn_),
        ratio(fp, fp + tn),
        ratio(tn, tn + fp),
        ratio(fn_, fn_ + tp),
    ]
}

/// Confusion matrix with derived counts and rates.
///
/// - binary: `confusion_matrix` is `[[tn, fp], [fn, tp]]`, all other fields scalar
/// - multiclass: `k x k` matrix (rows = true class, order given by `labels`) and
///   one-vs-rest vectors for every field
/// - multilabel: `k x 4` matrix with columns `tn, fp, fn, tp` per label, plus vectors
///
/// # Example
/// ```
/// use metrica::{confusion_matrix_metrics, LabelTypeSpec, MetricOptions, Values};
///
/// let y = Values::vector(vec![1.0, 0.0, 0.0, 1.0, 1.0]);
/// let options = MetricOptions::default().with_label_type(LabelTypeSpec::Binary);
/// let m = confusion_matrix_metrics(&y, &y, &options).unwrap();
/// assert_eq!(m.scalar("true_positive"), Some(3.0));
/// ```
pub fn confusion_matrix_metrics(
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
) -> Result<MetricMap> {
    require_label_predictions("confusion_matrix", y_true, y_pred)?;
    let (prepared, label_type) = prepare_labeled("confusion_matrix", y_true, y_pred, options)?;
    let counts = ClassCounts::from_labels(label_type, &prepared.y_true, &prepared.y_pred)?;

    let mut map = MetricMap::new();
    match label_type {
        LabelType::Binary => {
            let c = counts.binary();
            map.insert(
                "confusion_matrix",
                arr2(&[[c.tn as f64, c.fp as f64], [c.fn_ as f64, c.tp as f64]]),
            );
            for (key, value) in COUNT_KEYS.iter().zip(count_fields(&c)) {
                map.insert(*key, value);
            }
            for (key, value) in RATE_KEYS.iter().zip(rate_fields(&c)) {
                map.insert(*key, value);
            }
        }
        LabelType::Multiclass | LabelType::Multilabel => {
            let matrix = match &counts.confusion {
                Some(cm) => cm.to_array(),
                None => Array2::from_shape_fn((counts.per_class.len(), 4), |(i, j)| {
                    let c = &counts.per_class[i];
                    [c.tn, c.fp, c.fn_, c.tp][j] as f64
                }),
            };
            map.insert("confusion_matrix", matrix);
            if label_type == LabelType::Multiclass {
                map.insert("labels", counts.labels.clone());
            }
            insert_columns(&mut map, &COUNT_KEYS, &counts, count_fields);
            insert_columns(&mut map, &RATE_KEYS, &counts, rate_fields);
        }
    }
    map.insert("count", counts.n_samples);

    Ok(prepared.finish(map, options))
}

fn insert_columns(
    map: &mut MetricMap,
    keys: &[&str; 4],
    counts: &ClassCounts,
    fields: fn(&BinaryCounts) -> [f64; 4],
) {
    let rows: Vec<[f64; 4]> = counts.per_class.iter().map(fields).collect();
    for (j, key) in keys.iter().enumerate() {
        map.insert(*key, rows.iter().map(|r| r[j]).collect::<Vec<f64>>());
    }
}
