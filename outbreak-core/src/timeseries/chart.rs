//! Chart-ready data for the presentation layer.
//!
//! Builders here never fail: empty input produces an empty chart.

use serde::{Deserialize, Serialize};

use super::align::{align_series, union_axis};
use super::bucket::{Reduction, bucket_weekly};
use super::derive::{display_values, metric_values};
use crate::types::{ChartMode, CountrySnapshot, HistoricalSeries, MetricKey};

/// One line of a trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendDataset {
    /// Legend label (country name).
    pub label: String,
    /// Country code of the source series.
    pub code: String,
    /// One weekly value per entry of [`TrendChart::labels`].
    pub values: Vec<u64>,
}

/// Weekly trend lines for several countries on a shared axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendChart {
    /// Metric plotted.
    pub metric: MetricKey,
    /// Daily increments or cumulative counts.
    pub mode: ChartMode,
    /// Bucket labels, `"{start} → {end}"`.
    pub labels: Vec<String>,
    /// One dataset per input series, in input order.
    pub datasets: Vec<TrendDataset>,
    /// Lower y-axis hint: smallest value minus 10% of the value range, floored at 0.
    pub suggested_min: Option<f64>,
    /// Upper y-axis hint: largest value plus 10% of the value range.
    pub suggested_max: Option<f64>,
}

impl TrendChart {
    /// True when there is nothing to plot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

/// Build weekly trend lines for `metric`.
///
/// Series are first aligned on the union of their dates, then converted to
/// display values for `mode` and bucketed by week (sum for daily, last for
/// cumulative).
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(series), fields(series = series.len()))
)]
#[must_use]
pub fn build_trend_chart(
    series: &[HistoricalSeries],
    metric: MetricKey,
    mode: ChartMode,
) -> TrendChart {
    let axis = union_axis(series);
    let reduction = Reduction::from(mode);
    let mut labels = Vec::new();
    let datasets: Vec<TrendDataset> = align_series(series)
        .iter()
        .map(|s| {
            let shown = display_values(&metric_values(s, metric), mode);
            let buckets = bucket_weekly(&axis, &shown, reduction);
            if labels.is_empty() {
                labels = buckets.iter().map(|b| b.label()).collect();
            }
            TrendDataset {
                label: s.country_name.clone(),
                code: s.code.clone(),
                values: buckets.iter().map(|b| b.value).collect(),
            }
        })
        .collect();

    let (suggested_min, suggested_max) = axis_hints(&datasets);
    TrendChart {
        metric,
        mode,
        labels,
        datasets,
        suggested_min,
        suggested_max,
    }
}

#[allow(clippy::cast_precision_loss)]
fn axis_hints(datasets: &[TrendDataset]) -> (Option<f64>, Option<f64>) {
    let mut all = datasets.iter().flat_map(|d| d.values.iter().copied());
    let Some(first) = all.next() else {
        return (None, None);
    };
    let (min, max) = all.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let range = ((max - min) as f64).max(1.0);
    let padding = range * 0.1;
    (
        Some((min as f64 - padding).max(0.0)),
        Some(max as f64 + padding),
    )
}

/// One bar of the comparison chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonBar {
    /// Country display name.
    pub country: String,
    /// Country code.
    pub code: String,
    /// Metric value; missing values are rendered as 0.
    pub value: u64,
}

/// Side-by-side comparison of the current snapshots for one metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonChart {
    /// Metric compared.
    pub metric: MetricKey,
    /// Legend label of the metric.
    pub label: String,
    /// Bars in snapshot order.
    pub bars: Vec<ComparisonBar>,
    /// The same bars, largest value first. Ties keep snapshot order.
    pub ranking: Vec<ComparisonBar>,
    /// Largest bar value, 0 when there are no bars.
    pub max_value: u64,
}

/// Build the comparison bars and ranking for `metric`.
#[must_use]
pub fn build_comparison_chart(snapshots: &[CountrySnapshot], metric: MetricKey) -> ComparisonChart {
    let bars: Vec<ComparisonBar> = snapshots
        .iter()
        .map(|s| ComparisonBar {
            country: s.country.clone(),
            code: s.code.clone(),
            value: s.metric(metric).unwrap_or(0),
        })
        .collect();
    let mut ranking = bars.clone();
    ranking.sort_by(|a, b| b.value.cmp(&a.value));
    let max_value = bars.iter().map(|b| b.value).max().unwrap_or(0);
    ComparisonChart {
        metric,
        label: metric.label().to_string(),
        bars,
        ranking,
        max_value,
    }
}

/// Headline figures across the selected snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Sum of cumulative cases.
    pub total_cases: u64,
    /// `total_cases / countries`, rounded half away from zero.
    pub average_cases: u64,
    /// Number of countries summarized.
    pub countries: usize,
}

/// Summarize `snapshots`; `None` when there is nothing to summarize.
#[must_use]
pub fn summarize(snapshots: &[CountrySnapshot]) -> Option<SummaryStats> {
    if snapshots.is_empty() {
        return None;
    }
    let total_cases = snapshots
        .iter()
        .fold(0_u64, |acc, s| acc.saturating_add(s.cases));
    let n = snapshots.len() as u64;
    let average_cases = total_cases / n + u64::from(total_cases % n * 2 >= n);
    Some(SummaryStats {
        total_cases,
        average_cases,
        countries: snapshots.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HistoricalPoint;
    use chrono::NaiveDate;

    fn snap(code: &str, cases: u64, vaccinations: Option<u64>) -> CountrySnapshot {
        CountrySnapshot {
            country: format!("Country {code}"),
            code: code.to_string(),
            continent: None,
            flag_url: None,
            updated_at_epoch_ms: 0,
            cases,
            deaths: 0,
            active: 0,
            recovered: None,
            tests: None,
            vaccinations,
            population: None,
            today_cases: None,
            today_deaths: None,
            critical: None,
        }
    }

    fn series(code: &str, start: NaiveDate, cases: &[u64]) -> HistoricalSeries {
        let points = start
            .iter_days()
            .zip(cases)
            .map(|(date, &c)| HistoricalPoint { date, cases: c, deaths: 0, recovered: 0 })
            .collect();
        HistoricalSeries::new(code, code, points)
    }

    #[test]
    fn comparison_ranks_and_zero_fills() {
        let chart = build_comparison_chart(
            &[snap("A", 10, None), snap("B", 30, Some(5)), snap("C", 20, Some(9))],
            MetricKey::Vaccinations,
        );
        let bar_values: Vec<u64> = chart.bars.iter().map(|b| b.value).collect();
        assert_eq!(bar_values, vec![0, 5, 9]);
        let ranked: Vec<&str> = chart.ranking.iter().map(|b| b.code.as_str()).collect();
        assert_eq!(ranked, vec!["C", "B", "A"]);
        assert_eq!(chart.max_value, 9);
        assert_eq!(chart.label, "Vaccinations");
    }

    #[test]
    fn trend_on_misaligned_series_shares_axis() {
        let d0 = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let d3 = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
        let a = series("A", d0, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let b = series("B", d3, &[10, 10, 10, 10, 10]);
        let chart = build_trend_chart(&[a, b], MetricKey::Cases, ChartMode::Cumulative);
        assert_eq!(chart.labels.len(), 2);
        assert_eq!(chart.labels[0], "2021-01-01 → 2021-01-07");
        assert_eq!(chart.datasets[0].values, vec![7, 8]);
        assert_eq!(chart.datasets[1].values, vec![10, 10]);
    }

    #[test]
    fn daily_trend_sums_increments() {
        let d0 = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let cumulative: Vec<u64> = (1..=14).map(|i| i * 10).collect();
        let chart = build_trend_chart(
            &[series("A", d0, &cumulative)],
            MetricKey::Cases,
            ChartMode::Daily,
        );
        assert_eq!(chart.datasets[0].values, vec![70, 70]);
        let lo = chart.suggested_min.unwrap();
        let hi = chart.suggested_max.unwrap();
        assert!((lo - 69.9).abs() < 1e-9, "{lo}");
        assert!((hi - 70.1).abs() < 1e-9, "{hi}");
    }

    #[test]
    fn empty_inputs() {
        let chart = build_trend_chart(&[], MetricKey::Deaths, ChartMode::Daily);
        assert!(chart.is_empty());
        assert!(chart.labels.is_empty());
        assert_eq!(chart.suggested_max, None);
        let cmp = build_comparison_chart(&[], MetricKey::Cases);
        assert!(cmp.bars.is_empty());
        assert_eq!(cmp.max_value, 0);
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn summary_rounds_average() {
        let s = summarize(&[snap("A", 10, None), snap("B", 25, None)]).unwrap();
        assert_eq!(s.total_cases, 35);
        assert_eq!(s.average_cases, 18);
        assert_eq!(s.countries, 2);
    }
}
