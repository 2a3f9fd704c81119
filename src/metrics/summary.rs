//! Per-column descriptive statistics of a table

use crate::config::MetricOptions;
use crate::data::Table;
use crate::error::{Error, Result};
use crate::metrics::common::ratio;
use crate::metrics::map::MetricMap;
use crate::policy::NanPolicy;

/// Column statistics over the values given
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ColumnStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    /// NaN values flow into every statistic.
    pub fn from_values(values: impl Iterator<Item = f64> + Clone) -> Self {
        let count = values.clone().count();
        let mean = ratio(values.clone().sum(), count as f64);
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = values.clone().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };
        let (min, max) = if count == 0 || mean.is_nan() {
            (f64::NAN, f64::NAN)
        } else {
            values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
        };
        Self {
            mean,
            std,
            min,
            max,
        }
    }
}

/// Describe every column of a table.
///
/// Keys per column, in schema order: `<column>.count` (non-null values used),
/// `<column>.null_count` (nulls in the input), `<column>.mean`, `<column>.std`
/// (sample, `n - 1`), `<column>.min`, `<column>.max`; then `count`, the number
/// of rows described.
///
/// The NaN policy works on rows: `omit` drops every row holding a null in any
/// column, `raise` fails with `NanEncountered { array: "table" }`, and
/// `propagate` keeps all rows so statistics of a column holding nulls are NaN.
pub fn column_summary(table: &Table, options: &MetricOptions) -> Result<MetricMap> {
    let n_rows = table.n_rows();
    let columns: Vec<_> = table.columns().collect();
    let incomplete = |i: usize| columns.iter().any(|(_, c)| c[i].is_nan());

    let rows: Vec<usize> = match options.nan_policy {
        NanPolicy::Raise if (0..n_rows).any(incomplete) => {
            return Err(Error::NanEncountered { array: "table" })
        }
        NanPolicy::Omit => (0..n_rows).filter(|&i| !incomplete(i)).collect(),
        _ => (0..n_rows).collect(),
    };
    tracing::debug!(
        columns = columns.len(),
        rows = rows.len(),
        dropped = n_rows - rows.len(),
        "summarizing table"
    );

    let mut map = MetricMap::new();
    for (name, column) in &columns {
        let stats = ColumnStats::from_values(rows.iter().map(|&i| column[i]));
        let nulls = column.iter().filter(|v| v.is_nan()).count();
        let non_null = rows.iter().filter(|&&i| !column[i].is_nan()).count();

        map.insert(format!("{name}.count"), non_null);
        map.insert(format!("{name}.null_count"), nulls);
        map.insert(format!("{name}.mean"), stats.mean);
        map.insert(format!("{name}.std"), stats.std);
        map.insert(format!("{name}.min"), stats.min);
        map.insert(format!("{name}.max"), stats.max);
    }
    map.insert("count", rows.len());

    Ok(map.with_affixes(&options.prefix, &options.suffix))
}
