//! Error-based regression metrics

use super::outputs::{insert_per_output, mean};
use crate::config::MetricOptions;
use crate::data::Values;
use crate::error::Result;
use crate::metrics::common::prepare_same_shape;
use crate::metrics::map::MetricMap;
use ndarray::ArrayView1;

pub(crate) fn mae_of(t: ArrayView1<'_, f64>, p: ArrayView1<'_, f64>) -> Result<f64> {
    Ok(mean((&t - &p).mapv(f64::abs).view()))
}

pub(crate) fn mse_of(t: ArrayView1<'_, f64>, p: ArrayView1<'_, f64>) -> Result<f64> {
    Ok(mean((&t - &p).mapv(|d| d * d).view()))
}

pub(crate) fn rmse_of(t: ArrayView1<'_, f64>, p: ArrayView1<'_, f64>) -> Result<f64> {
    Ok(mse_of(t, p)?.sqrt())
}

/// `1 - SS_res / SS_tot`.
///
/// A constant `y_true` gives 1.0 for a perfect fit and 0.0 otherwise; fewer than
/// two samples give NaN.
pub(crate) fn r2_of(t: ArrayView1<'_, f64>, p: ArrayView1<'_, f64>) -> Result<f64> {
    if t.len() < 2 {
        return Ok(f64::NAN);
    }
    let t_mean = mean(t);
    let ss_res: f64 = t.iter().zip(p.iter()).map(|(a, b)| (a - b).powi(2)).sum();
    let ss_tot: f64 = t.iter().map(|a| (a - t_mean).powi(2)).sum();
    Ok(if ss_tot == 0.0 {
        if ss_res == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    })
}

fn error_metric(
    name: &'static str,
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
    score: fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> Result<f64>,
) -> Result<MetricMap> {
    let prepared = prepare_same_shape(name, y_true, y_pred, options)?;
    let mut map = MetricMap::new();
    insert_per_output(&mut map, name, &prepared, &score)?;
    map.insert("count", prepared.count());
    Ok(prepared.finish(map, options))
}

/// Mean absolute error under key `mean_absolute_error`.
///
/// Matrix input is treated as multi-output: a per-output vector plus
/// `mean_absolute_error_mean`.
///
/// # Example
/// ```
/// use metrica::{mean_absolute_error, MetricOptions, Values};
///
/// let y_true = Values::vector(vec![3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Values::vector(vec![2.5, 0.0, 2.0, 8.0]);
/// let m = mean_absolute_error(&y_true, &y_pred, &MetricOptions::default()).unwrap();
/// assert_eq!(m.scalar("mean_absolute_error"), Some(0.5));
/// ```
pub fn mean_absolute_error(
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
) -> Result<MetricMap> {
    error_metric("mean_absolute_error", y_true, y_pred, options, mae_of)
}

/// Mean squared error under key `mean_squared_error`.
pub fn mean_squared_error(
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
) -> Result<MetricMap> {
    error_metric("mean_squared_error", y_true, y_pred, options, mse_of)
}

/// Root mean squared error under key `root_mean_squared_error`.
pub fn root_mean_squared_error(
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
) -> Result<MetricMap> {
    error_metric("root_mean_squared_error", y_true, y_pred, options, rmse_of)
}

/// Coefficient of determination under key `r2`.
pub fn r2_score(y_true: &Values, y_pred: &Values, options: &MetricOptions) -> Result<MetricMap> {
    error_metric("r2", y_true, y_pred, options, r2_of)
}
