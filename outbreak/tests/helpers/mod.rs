// Shared fixtures for the outbreak integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use outbreak::{
    CountryListItem, CountrySnapshot, Dashboard, HistoricalPoint, HistoricalSeries, Outbreak,
    Selection,
};
use outbreak_mock::{DynamicMockConnector, DynamicMockController, MockBehavior};

pub const FR: &str = "FR";
pub const DE: &str = "DE";
pub const IT: &str = "IT";

pub fn item(code: &str) -> CountryListItem {
    let name = match code {
        FR => "France",
        DE => "Germany",
        IT => "Italy",
        other => other,
    };
    CountryListItem::new(name, code)
}

pub fn selection(codes: &[&str]) -> Selection {
    Selection::try_from_items(codes.iter().map(|c| item(c))).expect("valid test selection")
}

pub fn snap(code: &str, cases: u64, deaths: u64) -> CountrySnapshot {
    CountrySnapshot {
        country: item(code).name,
        code: code.to_string(),
        continent: None,
        flag_url: None,
        updated_at_epoch_ms: 0,
        cases,
        deaths,
        active: cases - deaths,
        recovered: None,
        tests: None,
        vaccinations: None,
        population: None,
        today_cases: None,
        today_deaths: None,
        critical: None,
    }
}

/// Cumulative series of `len` days starting 2021-01-01, growing by `step` per day.
pub fn series(code: &str, len: u64, step: u64) -> HistoricalSeries {
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid date");
    let points = (0..len)
        .map(|i| HistoricalPoint {
            date: start + Days::new(i),
            cases: step * (i + 1),
            deaths: i,
            recovered: 0,
        })
        .collect();
    HistoricalSeries::new(code, code, points)
}

/// Script `code` to answer both calls successfully.
pub async fn serve(ctl: &DynamicMockController, code: &str, cases: u64) {
    ctl.set_snapshot_behavior(code, MockBehavior::Return(snap(code, cases, cases / 100)))
        .await;
    ctl.set_history_behavior(code, MockBehavior::Return(series(code, 14, cases / 14)))
        .await;
}

pub fn dashboard_with(name: &'static str) -> (Dashboard, DynamicMockController) {
    let (connector, ctl) = DynamicMockConnector::new_with_controller(name);
    let outbreak = Outbreak::builder()
        .with_connector(connector)
        .history_days(14)
        .build()
        .expect("one connector registered");
    (Dashboard::new(Arc::new(outbreak)), ctl)
}
