//! Forecast column projection.

/// Project a single forecast column out of a tabular time series.
///
/// Rows with a missing value are dropped; surviving values are truncated
/// toward zero to integer MW. Row order is preserved (the sources emit rows
/// already ascending by timestamp).
pub fn project_forecast<'a, I>(rows: I) -> Vec<(&'a str, i64)>
where
    I: IntoIterator<Item = (&'a str, Option<f64>)>,
{
    rows.into_iter()
        .filter_map(|(timestamp, value)| value.map(|v| (timestamp, v.trunc() as i64)))
        .collect()
}
