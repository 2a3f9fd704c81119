//! Pearson and Spearman correlation with two-sided p-values

use crate::config::MetricOptions;
use crate::data::Values;
use crate::error::{Error, Result};
use crate::metrics::common::prepare_same_shape;
use crate::metrics::map::MetricMap;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Pearson coefficient; NaN for fewer than 2 samples or a constant input.
pub(crate) fn pearson_of(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    if x.len() < 2 {
        return f64::NAN;
    }
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denom = (sum_sq_x * sum_sq_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    (numerator / denom).clamp(-1.0, 1.0)
}

/// Ranks starting at 1, ties sharing their average rank.
pub(crate) fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // Positions i..=j hold ranks i+1..=j+1
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = rank;
        }
        i = j + 1;
    }
    ranks
}

/// Two-sided p-value of `r` under H0: no correlation, Student-t with `n - 2` dof.
pub(crate) fn correlation_pvalue(r: f64, n: usize) -> f64 {
    if r.is_nan() || n < 2 {
        return f64::NAN;
    }
    if n == 2 {
        // Two points always line up perfectly
        return 1.0;
    }
    let dof = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        return 0.0;
    }
    let t = r * (dof / denom).sqrt();
    match StudentsT::new(0.0, 1.0, dof) {
        Ok(dist) => (2.0 * dist.cdf(-t.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}

fn correlation(
    name: &'static str,
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
    coefficient: fn(&[f64], &[f64]) -> f64,
) -> Result<MetricMap> {
    let prepared = prepare_same_shape(name, y_true, y_pred, options)?;
    let (Some(x), Some(y)) = (prepared.y_true.as_vector(), prepared.y_pred.as_vector()) else {
        return Err(Error::InvalidInput(format!(
            "{name} expects 1-d inputs, got shape {:?}",
            prepared.y_true.shape()
        )));
    };

    let n = prepared.count();
    let r = coefficient(&x.to_vec(), &y.to_vec());
    if r.is_nan() && n > 0 {
        tracing::warn!(family = name, rows = n, "constant input or too few rows, correlation is NaN");
    }

    let mut map = MetricMap::new();
    map.insert(name, r);
    map.insert(format!("{name}_pvalue"), correlation_pvalue(r, n));
    map.insert("count", n);
    Ok(prepared.finish(map, options))
}

/// Pearson product-moment correlation under keys `pearson`, `pearson_pvalue`, `count`.
///
/// # Example
/// ```
/// use metrica::{pearson, MetricOptions, Values};
///
/// let x = Values::vector(vec![1.0, 2.0, 3.0, 4.0]);
/// let m = pearson(&x, &x, &MetricOptions::default()).unwrap();
/// assert_eq!(m.scalar("pearson"), Some(1.0));
/// assert_eq!(m.scalar("pearson_pvalue"), Some(0.0));
/// ```
pub fn pearson(y_true: &Values, y_pred: &Values, options: &MetricOptions) -> Result<MetricMap> {
    correlation("pearson", y_true, y_pred, options, pearson_of)
}

/// Spearman rank correlation under keys `spearman`, `spearman_pvalue`, `count`.
///
/// Ties receive their average rank.
pub fn spearman(y_true: &Values, y_pred: &Values, options: &MetricOptions) -> Result<MetricMap> {
    correlation("spearman", y_true, y_pred, options, |x, y| {
        pearson_of(&average_ranks(x), &average_ranks(y))
    })
}
