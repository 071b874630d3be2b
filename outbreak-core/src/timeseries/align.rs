use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::types::{HistoricalPoint, HistoricalSeries};

/// Sorted union of every date present in `series`.
#[must_use]
pub fn union_axis(series: &[HistoricalSeries]) -> Vec<NaiveDate> {
    series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Re-sample every series onto the shared [`union_axis`].
///
/// A date a series lacks takes that series' previous known counts; dates before
/// its first point are zero-filled. Each returned series has one point per axis date.
#[must_use]
pub fn align_series(series: &[HistoricalSeries]) -> Vec<HistoricalSeries> {
    let axis = union_axis(series);
    series.iter().map(|s| fill_onto(s, &axis)).collect()
}

fn fill_onto(series: &HistoricalSeries, axis: &[NaiveDate]) -> HistoricalSeries {
    let mut src = series.points.iter().peekable();
    let mut carry: Option<HistoricalPoint> = None;
    let mut points = Vec::with_capacity(axis.len());
    for &date in axis {
        while let Some(p) = src.next_if(|p| p.date <= date) {
            carry = Some(*p);
        }
        let filled = carry.map_or(
            HistoricalPoint { date, cases: 0, deaths: 0, recovered: 0 },
            |c| HistoricalPoint { date, ..c },
        );
        points.push(filled);
    }
    HistoricalSeries {
        country_name: series.country_name.clone(),
        code: series.code.clone(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 5, d).unwrap()
    }

    fn pt(d: u32, cases: u64) -> HistoricalPoint {
        HistoricalPoint { date: day(d), cases, deaths: 0, recovered: 0 }
    }

    #[test]
    fn forward_fills_gaps_and_zero_fills_leading_dates() {
        let a = HistoricalSeries::new("A", "AA", vec![pt(1, 10), pt(2, 20), pt(4, 40)]);
        let b = HistoricalSeries::new("B", "BB", vec![pt(3, 5), pt(4, 6)]);
        let aligned = align_series(&[a, b]);
        assert_eq!(aligned[0].dates(), vec![day(1), day(2), day(3), day(4)]);
        let a_cases: Vec<u64> = aligned[0].points.iter().map(|p| p.cases).collect();
        let b_cases: Vec<u64> = aligned[1].points.iter().map(|p| p.cases).collect();
        assert_eq!(a_cases, vec![10, 20, 20, 40]);
        assert_eq!(b_cases, vec![0, 0, 5, 6]);
        assert_eq!(aligned[1].country_name, "B");
    }

    #[test]
    fn aligned_inputs_are_unchanged() {
        let a = HistoricalSeries::new("A", "AA", vec![pt(1, 1), pt(2, 2)]);
        let b = HistoricalSeries::new("B", "BB", vec![pt(1, 3), pt(2, 4)]);
        let aligned = align_series(&[a.clone(), b.clone()]);
        assert_eq!(aligned, vec![a, b]);
    }
}
