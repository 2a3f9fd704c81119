//! Distances between one-dimensional empirical distributions

use super::outputs::insert_per_output;
use crate::config::MetricOptions;
use crate::data::Values;
use crate::error::Result;
use crate::metrics::common::prepare_same_shape;
use crate::metrics::map::MetricMap;
use ndarray::ArrayView1;

fn sorted(values: ArrayView1<'_, f64>) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Fraction of `sorted` values `<= x`
fn ecdf(sorted: &[f64], x: f64) -> f64 {
    sorted.partition_point(|&v| v <= x) as f64 / sorted.len() as f64
}

/// Statistical distance between the empirical CDFs of `u` and `v`.
///
/// `p = 1` integrates `|U - V|`; `p = 2` takes the square root of the integral
/// of `(U - V)^2`. NaN when either sample is empty.
pub(crate) fn cdf_distance(p: u32, u: ArrayView1<'_, f64>, v: ArrayView1<'_, f64>) -> f64 {
    if u.is_empty() || v.is_empty() {
        return f64::NAN;
    }
    let u_sorted = sorted(u);
    let v_sorted = sorted(v);
    let mut all: Vec<f64> = u_sorted.iter().chain(v_sorted.iter()).copied().collect();
    all.sort_by(f64::total_cmp);

    let integral: f64 = all
        .windows(2)
        .map(|w| {
            let diff = (ecdf(&u_sorted, w[0]) - ecdf(&v_sorted, w[0])).abs();
            diff.powi(p as i32) * (w[1] - w[0])
        })
        .sum();

    if p == 1 {
        integral
    } else {
        integral.powf(1.0 / p as f64)
    }
}

pub(crate) fn wasserstein_of(t: ArrayView1<'_, f64>, p: ArrayView1<'_, f64>) -> Result<f64> {
    Ok(cdf_distance(1, t, p))
}

pub(crate) fn energy_of(t: ArrayView1<'_, f64>, p: ArrayView1<'_, f64>) -> Result<f64> {
    Ok(std::f64::consts::SQRT_2 * cdf_distance(2, t, p))
}

fn distance_metric(
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

/// First Wasserstein (earth mover's) distance between the value distributions
/// of `y_true` and `y_pred`, key `wasserstein_distance`.
///
/// # Example
/// ```
/// use metrica::{wasserstein_distance, MetricOptions, Values};
///
/// let a = Values::vector(vec![0.0, 1.0, 3.0]);
/// let b = Values::vector(vec![5.0, 6.0, 8.0]);
/// let m = wasserstein_distance(&a, &b, &MetricOptions::default()).unwrap();
/// assert!((m.scalar("wasserstein_distance").unwrap() - 5.0).abs() < 1e-12);
/// ```
pub fn wasserstein_distance(
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
) -> Result<MetricMap> {
    distance_metric("wasserstein_distance", y_true, y_pred, options, wasserstein_of)
}

/// Energy distance `sqrt(2) * l2-cdf-distance`, key `energy_distance`.
pub fn energy_distance(
    y_true: &Values,
    y_pred: &Values,
    options: &MetricOptions,
) -> Result<MetricMap> {
    distance_metric("energy_distance", y_true, y_pred, options, energy_of)
}
