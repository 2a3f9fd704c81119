//! Classification report

use super::average::Average;
use super::counts::{require_indicator_values, ClassCounts};
use super::fbeta::{fbeta_of, precision_of, recall_of};
use crate::config::MetricOptions;
use crate::data::Values;
use crate::error::Result;
use crate::metrics::common::{prepare_labeled, require_label_predictions};
use crate::policy::LabelType;

/// Generate sklearn-style classification report
///
/// Binary input is reported per class like multiclass input and both end with
/// accuracy and the confusion matrix. Multilabel input is reported per label
/// column. Rows holding NaN are left out unless the policy is `raise`, which
/// fails instead.
///
/// # Returns
/// A formatted string containing per-class and overall metrics
///
/// # Example
/// ```
/// use metrica::{classification_report, MetricOptions, Values};
///
/// let y_true = Values::vector(vec![0.0, 1.0, 2.0, 2.0]);
/// let y_pred = Values::vector(vec![0.0, 1.0, 1.0, 2.0]);
/// let report = classification_report(&y_true, &y_pred, &MetricOptions::default()).unwrap();
/// assert!(report.contains("macro avg"));
/// ```
pub fn classification_report(
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
) -> Result<String> {
    require_label_predictions("classification_report", y_true, y_pred)?;
    let (prepared, label_type) = prepare_labeled("classification_report", y_true, y_pred, options)?;
    require_indicator_values(label_type, &prepared.y_true, &prepared.y_pred)?;
    let label_type = match label_type {
        LabelType::Binary => LabelType::Multiclass,
        other => other,
    };
    let counts = ClassCounts::from_labels(label_type, &prepared.y_true, &prepared.y_pred)?;

    let precision = counts.per_class_values(precision_of);
    let recall = counts.per_class_values(recall_of);
    let f1 = counts.per_class_values(|c| fbeta_of(c, 1.0));
    let support = counts.supports();
    let summed = counts.summed();

    let mut report = String::new();

    // Header
    report.push_str(&format!(
        "{:>12} {:>10} {:>10} {:>10} {:>10}\n",
        "", "precision", "recall", "f1-score", "support"
    ));
    report.push_str(&"-".repeat(54));
    report.push('\n');

    // Per-class metrics
    for (i, label) in counts.labels.iter().enumerate() {
        let name = match label_type {
            LabelType::Multilabel => format!("Label {label}"),
            _ => format!("Class {label}"),
        };
        report.push_str(&format!(
            "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            name, precision[i], recall[i], f1[i], support[i]
        ));
    }

    report.push_str(&"-".repeat(54));
    report.push('\n');

    // Averages
    let total_support: f64 = support.iter().sum();
    for average in Average::ALL {
        report.push_str(&format!(
            "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            format!("{} avg", average.suffix()),
            average.apply(&precision, &counts, precision_of(&summed)),
            average.apply(&recall, &counts, recall_of(&summed)),
            average.apply(&f1, &counts, fbeta_of(&summed, 1.0)),
            total_support
        ));
    }

    if let Some(cm) = &counts.confusion {
        report.push_str(&format!("\nAccuracy: {:.4}\n\n{cm}", cm.accuracy()));
    }

    Ok(report)
}
