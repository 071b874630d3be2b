use chrono::{Days, NaiveDate};
use outbreak_core::{HistoricalPoint, HistoricalSeries};

use super::countries;

/// Last day covered by the fixtures.
pub fn last_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, 9).unwrap_or_default()
}

/// First day covered by the fixtures.
pub fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 22).unwrap_or_default()
}

/// Recoveries stop being reported after this day, as they did upstream.
fn recovered_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 8, 4).unwrap_or_default()
}

fn seed(code: &str) -> u64 {
    code.bytes()
        .fold(17_u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)))
}

/// Deterministic cumulative series for `code`, covering at most `days` days up to
/// [`last_day`].
pub fn by_code(code: &str, days: u32) -> Option<HistoricalSeries> {
    let item = countries::by_code(code)?;
    Some(generate(&item.name, &item.code, seed(&item.code), days))
}

/// Worldwide series: the sum of every fixture country.
pub fn global(days: u32) -> HistoricalSeries {
    let parts: Vec<HistoricalSeries> = countries::all()
        .iter()
        .map(|c| generate(&c.name, &c.code, seed(&c.code), days))
        .collect();
    let mut points: Vec<HistoricalPoint> = parts.first().map(|s| s.points.clone()).unwrap_or_default();
    for part in parts.iter().skip(1) {
        for (acc, p) in points.iter_mut().zip(&part.points) {
            acc.cases += p.cases;
            acc.deaths += p.deaths;
            acc.recovered += p.recovered;
        }
    }
    HistoricalSeries::new("Global", "ALL", points)
}

fn generate(name: &str, code: &str, seed: u64, days: u32) -> HistoricalSeries {
    let span = (last_day() - first_day()).num_days() + 1;
    let n = i64::from(days).min(span);
    let start = last_day() - Days::new(u64::try_from(n - 1).unwrap_or(0));
    let offset = u64::try_from((start - first_day()).num_days()).unwrap_or(0);

    let base = 50 + seed % 400;
    let mut cases = 0_u64;
    let mut points = Vec::with_capacity(usize::try_from(n).unwrap_or(0));
    for i in 0..offset + u64::try_from(n).unwrap_or(0) {
        // weekly reporting rhythm plus a slow wave
        let wave = 1 + (i / 90) % 4;
        cases += base * wave + (i.wrapping_mul(seed) % 7) * 3;
        if i < offset {
            continue;
        }
        let date = first_day() + Days::new(i);
        let deaths = cases / 100;
        let recovered = if date <= recovered_cutoff() { cases * 9 / 10 } else { 0 };
        points.push(HistoricalPoint { date, cases, deaths, recovered });
    }
    HistoricalSeries::new(name, code, points)
}
