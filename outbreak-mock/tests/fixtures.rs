use std::time::Duration;

use outbreak_core::MetricKey;
use outbreak_core::connector::OutbreakConnector;
use outbreak_mock::{FAIL_CODE, MockConnector, SLOW_CODE, SLOW_DELAY};

#[tokio::test]
async fn catalog_is_sorted_and_unique() {
    let mock = MockConnector::new();
    let list = mock.as_countries_provider().unwrap().countries().await.unwrap();
    assert_eq!(list.len(), 10);
    let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_by_key(|n| n.to_lowercase());
    assert_eq!(names, sorted);
    let kosovo = list.iter().find(|c| c.name == "Kosovo").unwrap();
    assert_eq!(kosovo.code, "XKX");
    assert!(list.iter().all(|c| c.code != SLOW_CODE));
}

#[tokio::test]
async fn snapshot_keeps_active_within_cases() {
    let mock = MockConnector::new();
    let sp = mock.as_snapshot_provider().unwrap();
    for code in ["BR", "FR", "GB", "US", "XKX"] {
        let s = sp.snapshot(code).await.unwrap();
        assert_eq!(s.code, code);
        assert!(s.active <= s.cases, "{code}");
        assert_eq!(s.metric(MetricKey::Cases), Some(s.cases));
    }
    let uk = sp.snapshot("GB").await.unwrap();
    assert_eq!(uk.active, uk.cases - uk.deaths);
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let mock = MockConnector::new();
    let err = mock
        .as_snapshot_provider()
        .unwrap()
        .snapshot("ZZ")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn fail_code_fails_every_capability() {
    let mock = MockConnector::new();
    assert!(mock.as_snapshot_provider().unwrap().snapshot(FAIL_CODE).await.is_err());
    assert!(mock.as_history_provider().unwrap().history(FAIL_CODE, 5).await.is_err());
    assert!(
        mock.as_vaccine_coverage_provider()
            .unwrap()
            .vaccine_coverage(FAIL_CODE)
            .await
            .is_err()
    );
}

#[tokio::test(start_paused = true)]
async fn slow_code_answers_after_delay() {
    let mock = MockConnector::new();
    let sp = mock.as_snapshot_provider().unwrap();
    let start = tokio::time::Instant::now();
    let s = sp.snapshot(SLOW_CODE).await.unwrap();
    assert_eq!(s.country, "Slowland");
    assert!(start.elapsed() >= SLOW_DELAY);
    assert!(start.elapsed() < SLOW_DELAY + Duration::from_millis(50));
}

#[tokio::test]
async fn history_is_windowed_ascending_and_monotone() {
    let mock = MockConnector::new();
    let hp = mock.as_history_provider().unwrap();
    let s = hp.history("FR", 30).await.unwrap();
    assert_eq!(s.len(), 30);
    assert!(s.points.windows(2).all(|w| w[0].date < w[1].date));
    assert!(s.points.windows(2).all(|w| w[0].cases <= w[1].cases));

    let again = hp.history("FR", 30).await.unwrap();
    assert_eq!(s, again);
    assert!(hp.history("FR", 0).await.is_err());
}

#[tokio::test]
async fn global_history_sums_countries() {
    let mock = MockConnector::new();
    let g = mock
        .as_global_history_provider()
        .unwrap()
        .global_history(3)
        .await
        .unwrap();
    assert_eq!(g.code, "ALL");
    assert_eq!(g.len(), 3);

    let hp = mock.as_history_provider().unwrap();
    let mut total = 0;
    for code in ["BR", "FR", "DE", "IN", "IT", "JP", "XKX", "ZA", "GB", "US"] {
        total += hp.history(code, 3).await.unwrap().points[2].cases;
    }
    assert_eq!(g.points[2].cases, total);
}
