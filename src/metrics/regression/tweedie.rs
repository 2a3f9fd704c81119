//! Mean Tweedie deviance

use super::outputs::{insert_per_output, mean};
use crate::config::{validate_tweedie_power, MetricOptions};
use crate::data::Values;
use crate::error::{Error, Result};
use crate::metrics::common::prepare_same_shape;
use crate::metrics::map::MetricMap;
use ndarray::{Array1, ArrayView1};

fn domain_error(power: f64, requirement: &str) -> Error {
    Error::InvalidInput(format!(
        "mean_tweedie_deviance with power={power} requires {requirement}"
    ))
}

/// `y * ln(y / mu)` with the `0 * ln(0) = 0` convention
fn xlogy(y: f64, ratio: f64) -> f64 {
    if y == 0.0 {
        0.0
    } else {
        y * ratio.ln()
    }
}

/// Unit deviance of one output column, averaged.
pub(crate) fn tweedie_of(t: ArrayView1<'_, f64>, p: ArrayView1<'_, f64>, power: f64) -> Result<f64> {
    let any = |f: &dyn Fn(f64) -> bool, a: &ArrayView1<'_, f64>| a.iter().any(|&x| f(x));

    let deviance: Array1<f64> = if power == 0.0 {
        // Normal
        (&t - &p).mapv(|d| d * d)
    } else if power < 0.0 {
        if any(&|x| x <= 0.0, &p) {
            return Err(domain_error(power, "strictly positive y_pred"));
        }
        t.iter()
            .zip(p.iter())
            .map(|(&y, &mu)| {
                2.0 * (y.max(0.0).powf(2.0 - power) / ((1.0 - power) * (2.0 - power))
                    - y * mu.powf(1.0 - power) / (1.0 - power)
                    + mu.powf(2.0 - power) / (2.0 - power))
            })
            .collect()
    } else if power == 1.0 {
        // Poisson
        if any(&|x| x < 0.0, &t) || any(&|x| x <= 0.0, &p) {
            return Err(domain_error(
                power,
                "non-negative y_true and strictly positive y_pred",
            ));
        }
        t.iter()
            .zip(p.iter())
            .map(|(&y, &mu)| 2.0 * (xlogy(y, y / mu) - y + mu))
            .collect()
    } else if power == 2.0 {
        // Gamma
        if any(&|x| x <= 0.0, &t) || any(&|x| x <= 0.0, &p) {
            return Err(domain_error(power, "strictly positive y_true and y_pred"));
        }
        t.iter()
            .zip(p.iter())
            .map(|(&y, &mu)| 2.0 * ((mu / y).ln() + y / mu - 1.0))
            .collect()
    } else {
        let y_invalid = if power < 2.0 {
            any(&|x| x < 0.0, &t)
        } else {
            any(&|x| x <= 0.0, &t)
        };
        if y_invalid || any(&|x| x <= 0.0, &p) {
            return Err(domain_error(
                power,
                "y_true in the distribution support and strictly positive y_pred",
            ));
        }
        t.iter()
            .zip(p.iter())
            .map(|(&y, &mu)| {
                2.0 * (y.powf(2.0 - power) / ((1.0 - power) * (2.0 - power))
                    - y * mu.powf(1.0 - power) / (1.0 - power)
                    + mu.powf(2.0 - power) / (2.0 - power))
            })
            .collect()
    };

    Ok(mean(deviance.view()))
}

/// Mean Tweedie deviance under key `tweedie_deviance`.
///
/// `power` selects the distribution: 0 normal, 1 Poisson, 2 Gamma, and the
/// general form for `p < 0` or `p >= 1`. Powers in `(0, 1)` are rejected.
/// Values outside the distribution's support fail with `InvalidInput`.
pub fn mean_tweedie_deviance(
    y_true: &Values,
    y_pred: &Values,
    power: f64,
    options: &MetricOptions,
) -> Result<MetricMap> {
    validate_tweedie_power(power)?;
    let prepared = prepare_same_shape("tweedie_deviance", y_true, y_pred, options)?;
    let mut map = MetricMap::new();
    insert_per_output(
        &mut map,
        "tweedie_deviance",
        &prepared,
        &move |t: ArrayView1<'_, f64>, p: ArrayView1<'_, f64>| tweedie_of(t, p, power),
    )?;
    map.insert("count", prepared.count());
    Ok(prepared.finish(map, options))
}
