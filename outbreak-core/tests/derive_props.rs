use chrono::NaiveDate;
use outbreak_core::{
    HistoricalPoint, HistoricalSeries, MetricKey, Reduction, WEEK, align_series, bucket_weekly,
    daily_deltas, metric_values, union_axis, weekly_values,
};
use proptest::prelude::*;

fn arb_point() -> impl Strategy<Value = HistoricalPoint> {
    (0i64..400, 0u64..1_000_000, 0u64..100_000, 0u64..1_000_000).prop_map(
        |(offset, cases, deaths, recovered)| HistoricalPoint {
            date: NaiveDate::from_ymd_opt(2020, 1, 22).unwrap() + chrono::Days::new(offset as u64),
            cases,
            deaths,
            recovered,
        },
    )
}

fn arb_series() -> impl Strategy<Value = HistoricalSeries> {
    proptest::collection::vec(arb_point(), 0..60)
        .prop_map(|points| HistoricalSeries::new("Testland", "TL", points))
}

proptest! {
    #[test]
    fn series_points_strictly_ascending(s in arb_series()) {
        for w in s.points.windows(2) {
            prop_assert!(w[0].date < w[1].date);
        }
    }

    #[test]
    fn deltas_preserve_length_and_first_value(values in proptest::collection::vec(0u64..10_000_000, 0..200)) {
        let d = daily_deltas(&values);
        prop_assert_eq!(d.len(), values.len());
        if let Some(first) = values.first() {
            prop_assert_eq!(d[0], *first);
        }
        for i in 1..values.len() {
            prop_assert_eq!(d[i], values[i].saturating_sub(values[i - 1]));
        }
    }

    #[test]
    fn active_never_exceeds_cases(s in arb_series()) {
        let active = metric_values(&s, MetricKey::Active);
        let cases = metric_values(&s, MetricKey::Cases);
        for (a, c) in active.iter().zip(&cases) {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn weekly_sums_conserve_total(values in proptest::collection::vec(0u64..1_000_000, 0..200)) {
        let weeks = weekly_values(&values, Reduction::Sum);
        prop_assert_eq!(weeks.len(), values.len().div_ceil(WEEK));
        prop_assert_eq!(weeks.iter().sum::<u64>(), values.iter().sum::<u64>());
    }

    #[test]
    fn weekly_last_matches_chunk_ends(s in arb_series()) {
        let dates = s.dates();
        let cases = metric_values(&s, MetricKey::Cases);
        let buckets = bucket_weekly(&dates, &cases, Reduction::Last);
        for (i, b) in buckets.iter().enumerate() {
            let end = ((i + 1) * WEEK).min(cases.len()) - 1;
            prop_assert_eq!(b.value, cases[end]);
            prop_assert_eq!(b.end, dates[end]);
            prop_assert_eq!(b.start, dates[i * WEEK]);
        }
    }

    #[test]
    fn aligned_series_share_the_union_axis(a in arb_series(), b in arb_series()) {
        let input = vec![a, b];
        let axis = union_axis(&input);
        let aligned = align_series(&input);
        for (orig, s) in input.iter().zip(&aligned) {
            prop_assert_eq!(s.dates(), axis.clone());
            // every original point survives unchanged
            for p in &orig.points {
                prop_assert!(s.points.contains(p));
            }
        }
    }
}
