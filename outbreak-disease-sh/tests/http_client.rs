use httpmock::prelude::*;
use outbreak_core::connector::{
    CountriesProvider, GlobalHistoryProvider, HistoryProvider, SnapshotProvider,
};
use outbreak_core::{OutbreakError, StatusCategory};
use outbreak_disease_sh::{DiseaseShConfig, DiseaseShConnector};
use serde_json::json;

fn connector(server: &MockServer) -> DiseaseShConnector {
    DiseaseShConnector::try_new(&DiseaseShConfig::default().with_base_url(server.base_url()))
        .expect("valid test config")
}

#[tokio::test]
async fn countries_are_normalized() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET).path("/countries");
            then.status(200).json_body(json!([
                {"country": "Zimbabwe", "countryInfo": {"iso2": "ZW", "iso3": "ZWE", "flag": "zw.png"}},
                {"country": "MS Zaandam", "countryInfo": {"_id": null, "iso2": null, "iso3": null}},
                {"country": "austria", "countryInfo": {"iso2": "AT", "iso3": "AUT"}}
            ]));
        })
        .await;

    let list = connector(&server).countries().await.unwrap();
    m.assert_async().await;
    let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["austria", "Zimbabwe"]);
    assert_eq!(list[1].flag_url.as_deref(), Some("zw.png"));
}

#[tokio::test]
async fn snapshot_merges_vaccine_coverage() {
    let server = MockServer::start_async().await;
    let snap = server
        .mock_async(|when, then| {
            when.method(GET).path("/countries/FR");
            then.status(200).json_body(json!({
                "country": "France",
                "countryInfo": {"iso2": "FR", "iso3": "FRA", "flag": "fr.png"},
                "updated": 1_700_000_000_000_i64,
                "cases": 1000, "deaths": 10, "recovered": 900, "active": 90,
                "tests": 5000, "population": 67_000_000, "continent": "Europe",
                "todayCases": 3, "todayDeaths": 0, "critical": 1
            }));
        })
        .await;
    let vac = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/vaccine/coverage/countries/FR")
                .query_param("lastdays", "1")
                .query_param("fullData", "false");
            then.status(200)
                .json_body(json!({"country": "France", "timeline": {"10/12/26": 150_000_000}}));
        })
        .await;

    let s = connector(&server).snapshot("FR").await.unwrap();
    snap.assert_async().await;
    vac.assert_async().await;
    assert_eq!(s.country, "France");
    assert_eq!(s.code, "FR");
    assert_eq!(s.active, 90);
    assert_eq!(s.vaccinations, Some(150_000_000));
    assert_eq!(s.continent.as_deref(), Some("Europe"));
    assert_eq!(s.updated_at_epoch_ms, 1_700_000_000_000);
}

#[tokio::test]
async fn vaccine_failure_does_not_fail_snapshot() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/countries/DE");
            then.status(200)
                .json_body(json!({"country": "Germany", "cases": 50, "deaths": 5}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/vaccine/coverage/countries/DE");
            then.status(500);
        })
        .await;

    let s = connector(&server).snapshot("DE").await.unwrap();
    assert_eq!(s.vaccinations, None);
    // no `active` field: derived from cases - deaths - recovered
    assert_eq!(s.active, 45);
}

#[tokio::test]
async fn history_decodes_timeline() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET).path("/historical/IT").query_param("lastdays", "3");
            then.status(200).json_body(json!({
                "country": "Italy",
                "province": ["mainland"],
                "timeline": {
                    "cases": {"3/1/23": 100, "3/2/23": 150, "3/3/23": 140},
                    "deaths": {"3/1/23": 1, "3/2/23": 2, "3/3/23": 2},
                    "recovered": {"3/1/23": 0}
                }
            }));
        })
        .await;

    let series = connector(&server).history("IT", 3).await.unwrap();
    m.assert_async().await;
    assert_eq!(series.country_name, "Italy");
    assert_eq!(series.code, "IT");
    let cases: Vec<u64> = series.points.iter().map(|p| p.cases).collect();
    assert_eq!(cases, vec![100, 150, 140]);
    assert!(series.points.iter().all(|p| p.recovered == 0));
}

#[tokio::test]
async fn global_history_is_named_global() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET).path("/historical/all").query_param("lastdays", "2");
            then.status(200).json_body(json!({
                "cases": {"1/1/22": 10, "1/2/22": 20},
                "deaths": {"1/1/22": 1, "1/2/22": 1},
                "recovered": {}
            }));
        })
        .await;

    let series = connector(&server).global_history(2).await.unwrap();
    m.assert_async().await;
    assert_eq!(series.country_name, "Global");
    assert_eq!(series.code, "ALL");
    assert_eq!(series.len(), 2);
}

#[tokio::test]
async fn statuses_map_to_categories() {
    let server = MockServer::start_async().await;
    for (code, status) in [("NF", 404_u16), ("RL", 429), ("SE", 503), ("TP", 418)] {
        server
            .mock_async(move |when, then| {
                when.method(GET).path(format!("/historical/{code}"));
                then.status(status);
            })
            .await;
    }
    let c = connector(&server);

    let err = c.history("NF", 30).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "outbreak-disease-sh: not found (HTTP 404)");

    let err = c.history("RL", 30).await.unwrap_err();
    assert_eq!(err.status_category(), Some(StatusCategory::RateLimited));

    let err = c.history("SE", 30).await.unwrap_err();
    assert_eq!(err.to_string(), "outbreak-disease-sh: server error (HTTP 503)");

    let err = c.history("TP", 30).await.unwrap_err();
    assert_eq!(err.status_category(), Some(StatusCategory::Unknown));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/countries");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = connector(&server).countries().await.unwrap_err();
    assert!(matches!(err, OutbreakError::Decode { ref connector, .. } if connector == "outbreak-disease-sh"));
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    // port 9 (discard) on localhost is expected to refuse connections
    let c = DiseaseShConnector::try_new(
        &DiseaseShConfig::default().with_base_url("http://127.0.0.1:9"),
    )
    .unwrap();
    let err = c.countries().await.unwrap_err();
    assert!(matches!(err, OutbreakError::Transport { .. }), "{err:?}");
}
