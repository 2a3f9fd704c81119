//! Shared layout for count-based score families
//!
//! Binary problems produce one scalar per score. Multiclass and multilabel
//! problems produce a per-class vector plus `_macro`, `_micro` and `_weighted`
//! aggregates. Degenerate per-class denominators use zero-division = 0; empty
//! input makes every score NaN.

use super::average::Average;
use super::counts::{BinaryCounts, ClassCounts};
use crate::config::MetricOptions;
use crate::data::Values;
use crate::error::Result;
use crate::metrics::common::{prepare_labeled, require_label_predictions};
use crate::metrics::map::MetricMap;
use crate::policy::LabelType;

/// A named per-class formula over outcome counts
pub(crate) type Formula<'a> = (&'a str, &'a dyn Fn(&BinaryCounts) -> f64);

/// Compute every formula for the resolved label type.
pub(crate) fn score_family(
    family: &'static str,
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
    formulas: &[Formula<'_>],
) -> Result<MetricMap> {
    require_label_predictions(family, y_true, y_pred)?;
    let (prepared, label_type) = prepare_labeled(family, y_true, y_pred, options)?;
    let counts = ClassCounts::from_labels(label_type, &prepared.y_true, &prepared.y_pred)?;

    let mut map = MetricMap::new();
    for (name, formula) in formulas {
        insert_scores(&mut map, name, &counts, formula);
    }
    insert_support(&mut map, &counts);
    map.insert("count", counts.n_samples);

    Ok(prepared.finish(map, options))
}

/// Insert one score under the layout of the counts' label type.
pub(crate) fn insert_scores(
    map: &mut MetricMap,
    name: &str,
    counts: &ClassCounts,
    formula: &dyn Fn(&BinaryCounts) -> f64,
) {
    let empty = counts.n_samples == 0;
    let score = |c: &BinaryCounts| if empty { f64::NAN } else { formula(c) };

    match counts.label_type {
        LabelType::Binary => map.insert(name, score(&counts.binary())),
        LabelType::Multiclass | LabelType::Multilabel => {
            let per_class = counts.per_class_values(&score);
            let micro = score(&counts.summed());
            map.insert(name, per_class.clone());
            for average in Average::ALL {
                let key = format!("{name}_{}", average.suffix());
                map.insert(key, average.apply(&per_class, counts, micro));
            }
        }
    }
}

/// Insert `support` (and `labels` for multiclass).
pub(crate) fn insert_support(map: &mut MetricMap, counts: &ClassCounts) {
    match counts.label_type {
        LabelType::Binary => map.insert("support", counts.binary().support()),
        LabelType::Multiclass => {
            map.insert("support", counts.supports());
            map.insert("labels", counts.labels.clone());
        }
        LabelType::Multilabel => map.insert("support", counts.supports()),
    }
}
