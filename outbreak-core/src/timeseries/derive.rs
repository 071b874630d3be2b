use crate::types::{ChartMode, HistoricalSeries, MetricKey};

/// Per-point values of `metric` over the series, in date order.
///
/// `Active` is derived per point as `max(0, cases - deaths - recovered)`.
#[must_use]
pub fn metric_values(series: &HistoricalSeries, metric: MetricKey) -> Vec<u64> {
    series.points.iter().map(|p| p.value(metric)).collect()
}

/// Convert a cumulative sequence into per-day increments.
///
/// The first value is kept as-is; each later value becomes
/// `max(0, current - previous)`, so downward corrections read as zero new cases.
#[must_use]
pub fn daily_deltas(values: &[u64]) -> Vec<u64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<u64> = None;
    for &v in values {
        out.push(prev.map_or(v, |p| v.saturating_sub(p)));
        prev = Some(v);
    }
    out
}

/// Values as they should be displayed for `mode`.
#[must_use]
pub fn display_values(values: &[u64], mode: ChartMode) -> Vec<u64> {
    match mode {
        ChartMode::Daily => daily_deltas(values),
        ChartMode::Cumulative => values.to_vec(),
    }
}
