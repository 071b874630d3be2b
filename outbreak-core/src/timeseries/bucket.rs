use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::ChartMode;

/// Number of consecutive points aggregated into one bucket.
pub const WEEK: usize = 7;

/// How the values inside a bucket collapse into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reduction {
    /// Sum of the values; used for per-day increments.
    Sum,
    /// Last value of the bucket; used for cumulative counts.
    Last,
}

impl From<ChartMode> for Reduction {
    fn from(mode: ChartMode) -> Self {
        match mode {
            ChartMode::Daily => Self::Sum,
            ChartMode::Cumulative => Self::Last,
        }
    }
}

impl Reduction {
    /// Collapse `values` into a single value. Empty input yields 0.
    #[must_use]
    pub fn apply(self, values: &[u64]) -> u64 {
        match self {
            Self::Sum => values.iter().fold(0_u64, |acc, v| acc.saturating_add(*v)),
            Self::Last => values.last().copied().unwrap_or(0),
        }
    }
}

/// One aggregated span of consecutive points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Date of the first point in the bucket.
    pub start: NaiveDate,
    /// Date of the last point in the bucket.
    pub end: NaiveDate,
    /// Reduced value.
    pub value: u64,
}

impl Bucket {
    /// Axis label, `"{start} → {end}"` with ISO dates.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} → {}", self.start, self.end)
    }
}

/// Reduce consecutive runs of [`WEEK`] values. The final run may be shorter.
#[must_use]
pub fn weekly_values(values: &[u64], reduction: Reduction) -> Vec<u64> {
    values
        .chunks(WEEK)
        .map(|chunk| reduction.apply(chunk))
        .collect()
}

/// Group aligned `dates`/`values` into weekly buckets.
///
/// Both slices are walked together; extra entries in the longer slice are ignored.
#[must_use]
pub fn bucket_weekly(dates: &[NaiveDate], values: &[u64], reduction: Reduction) -> Vec<Bucket> {
    let n = dates.len().min(values.len());
    dates[..n]
        .chunks(WEEK)
        .zip(values[..n].chunks(WEEK))
        .filter_map(|(ds, vs)| {
            Some(Bucket {
                start: *ds.first()?,
                end: *ds.last()?,
                value: reduction.apply(vs),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        start.iter_days().take(n).collect()
    }

    #[test]
    fn fourteen_values_make_two_weeks() {
        let values: Vec<u64> = (1..=14).collect();
        let d = dates(14);
        let sums = bucket_weekly(&d, &values, Reduction::Sum);
        assert_eq!(sums.len(), 2);
        assert_eq!(sums[0].value, 28);
        assert_eq!(sums[1].value, 77);
        assert_eq!(sums[0].label(), "2021-01-01 → 2021-01-07");
        assert_eq!(sums[1].start, d[7]);

        let lasts = bucket_weekly(&d, &values, Reduction::Last);
        assert_eq!(lasts.iter().map(|b| b.value).collect::<Vec<_>>(), vec![7, 14]);
    }

    #[test]
    fn trailing_bucket_may_be_short() {
        let values = [1_u64; 9];
        let d = dates(9);
        let b = bucket_weekly(&d, &values, Reduction::Sum);
        assert_eq!(b.len(), 2);
        assert_eq!(b[1].value, 2);
        assert_eq!(b[1].start, d[7]);
        assert_eq!(b[1].end, d[8]);
        assert_eq!(weekly_values(&values, Reduction::Sum), vec![7, 2]);
    }

    #[test]
    fn reduction_follows_chart_mode() {
        assert_eq!(Reduction::from(ChartMode::Daily), Reduction::Sum);
        assert_eq!(Reduction::from(ChartMode::Cumulative), Reduction::Last);
        assert!(bucket_weekly(&[], &[], Reduction::Sum).is_empty());
    }
}
