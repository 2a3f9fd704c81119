//! All regression metrics in one mapping

use super::distance::{energy_of, wasserstein_of};
use super::errors::{mae_of, mse_of, r2_of, rmse_of};
use super::outputs::{insert_per_output, OutputScore};
use super::tweedie::tweedie_of;
use crate::config::{validate_tweedie_power, MetricOptions};
use crate::data::Values;
use crate::error::Result;
use crate::metrics::common::prepare_same_shape;
use crate::metrics::map::MetricMap;
use ndarray::ArrayView1;

/// Every regression metric over one NaN-filtered pair.
///
/// Keys, in order: `mean_absolute_error`, `mean_squared_error`,
/// `root_mean_squared_error`, `r2`, `tweedie_deviance` (at `power`),
/// `wasserstein_distance`, `energy_distance`, `count`. Matrix input adds a
/// `<name>_mean` after each per-output vector.
pub fn regression_metrics(
    y_true: &Values,
    y_pred: &Values,
    power: f64,
    options: &MetricOptions,
) -> Result<MetricMap> {
    validate_tweedie_power(power)?;
    let prepared = prepare_same_shape("regression", y_true, y_pred, options)?;

    let tweedie = move |t: ArrayView1<'_, f64>, p: ArrayView1<'_, f64>| tweedie_of(t, p, power);
    let scores: [(&str, &OutputScore); 7] = [
        ("mean_absolute_error", &mae_of),
        ("mean_squared_error", &mse_of),
        ("root_mean_squared_error", &rmse_of),
        ("r2", &r2_of),
        ("tweedie_deviance", &tweedie),
        ("wasserstein_distance", &wasserstein_of),
        ("energy_distance", &energy_of),
    ];

    let mut map = MetricMap::new();
    for (name, score) in scores {
        insert_per_output(&mut map, name, &prepared, score)?;
    }
    map.insert("count", prepared.count());
    Ok(prepared.finish(map, options))
}
