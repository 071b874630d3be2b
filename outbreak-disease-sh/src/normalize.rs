//! Wire-to-domain mapping.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use outbreak_core::{
    CountryListItem, CountrySnapshot, HistoricalPoint, HistoricalSeries, OutbreakError,
};

use crate::wire::{CountryWire, TimelineWire, parse_timeline_date};

const CONNECTOR: &str = "outbreak-disease-sh";

/// Clamp a provider number into a count. Negative and non-finite values read as 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn count(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        v.round() as u64
    } else {
        0
    }
}

fn opt_count(v: Option<f64>) -> Option<u64> {
    v.map(count)
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Catalog entries with a usable code, sorted by name, unique by code.
pub(crate) fn catalog(raw: Vec<CountryWire>) -> Vec<CountryListItem> {
    let mut items: Vec<CountryListItem> = raw
        .into_iter()
        .filter_map(|c| {
            let name = non_blank(c.country.as_deref())?.to_string();
            let info = c.country_info.unwrap_or_default();
            let iso2 = non_blank(info.iso2.as_deref()).map(str::to_string);
            let iso3 = non_blank(info.iso3.as_deref()).map(str::to_string);
            let code = iso2.clone().or_else(|| iso3.clone())?;
            Some(CountryListItem {
                name,
                code,
                iso2,
                iso3,
                flag_url: info.flag,
            })
        })
        .collect();
    items.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    let mut seen = HashSet::new();
    items.retain(|i| seen.insert(i.code.clone()));
    items
}

/// Snapshot for `code`, keeping `active <= cases`.
pub(crate) fn snapshot(
    code: &str,
    raw: CountryWire,
    vaccinations: Option<u64>,
) -> Result<CountrySnapshot, OutbreakError> {
    let country = non_blank(raw.country.as_deref())
        .ok_or_else(|| {
            OutbreakError::decode(CONNECTOR, format!("snapshot for {code} has no country name"))
        })?
        .to_string();
    let cases = opt_count(raw.cases).unwrap_or(0);
    let deaths = opt_count(raw.deaths).unwrap_or(0);
    let recovered = opt_count(raw.recovered);
    let active = opt_count(raw.active).unwrap_or_else(|| {
        CountrySnapshot::derive_active(cases, deaths, recovered.unwrap_or(0))
    });
    Ok(CountrySnapshot {
        country,
        code: code.to_string(),
        continent: raw.continent.filter(|c| !c.trim().is_empty()),
        flag_url: raw.country_info.and_then(|i| i.flag),
        updated_at_epoch_ms: raw.updated.unwrap_or(0),
        cases,
        deaths,
        active,
        recovered,
        tests: opt_count(raw.tests),
        vaccinations,
        population: opt_count(raw.population),
        today_cases: opt_count(raw.today_cases),
        today_deaths: opt_count(raw.today_deaths),
        critical: opt_count(raw.critical),
    }
    .clamped())
}

fn dated(
    map: &BTreeMap<String, f64>,
    what: &str,
) -> Result<Vec<(NaiveDate, u64)>, OutbreakError> {
    map.iter()
        .map(|(k, v)| {
            parse_timeline_date(k)
                .map(|d| (d, count(*v)))
                .ok_or_else(|| {
                    OutbreakError::decode(CONNECTOR, format!("invalid {what} date key {k:?}"))
                })
        })
        .collect()
}

/// Series from a date-keyed timeline. `cases` defines the date axis; missing
/// deaths or recoveries on an axis date read as 0.
pub(crate) fn series(
    name: impl Into<String>,
    code: impl Into<String>,
    timeline: &TimelineWire,
) -> Result<HistoricalSeries, OutbreakError> {
    let deaths: HashMap<NaiveDate, u64> =
        dated(&timeline.deaths, "deaths")?.into_iter().collect();
    let recovered: HashMap<NaiveDate, u64> = match &timeline.recovered {
        Some(map) => dated(map, "recovered")?.into_iter().collect(),
        None => HashMap::new(),
    };
    let points = dated(&timeline.cases, "cases")?
        .into_iter()
        .map(|(date, cases)| HistoricalPoint {
            date,
            cases,
            deaths: deaths.get(&date).copied().unwrap_or(0),
            recovered: recovered.get(&date).copied().unwrap_or(0),
        })
        .collect();
    Ok(HistoricalSeries::new(name, code, points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::CountryInfoWire;

    fn wire(name: &str, iso2: Option<&str>, iso3: Option<&str>) -> CountryWire {
        CountryWire {
            country: Some(name.to_string()),
            country_info: Some(CountryInfoWire {
                iso2: iso2.map(str::to_string),
                iso3: iso3.map(str::to_string),
                flag: None,
            }),
            ..CountryWire::default()
        }
    }

    #[test]
    fn catalog_filters_sorts_and_dedups() {
        let out = catalog(vec![
            wire("france", Some("FR"), Some("FRA")),
            wire("Diamond Princess", None, None),
            wire("Kosovo", Some(" "), Some("XKX")),
            wire("Austria", Some("AT"), Some("AUT")),
            wire("France (dup)", Some("FR"), None),
        ]);
        let codes: Vec<&str> = out.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["AT", "FR", "XKX"]);
        assert_eq!(out[1].name, "france");
        assert_eq!(out[2].iso2, None);
    }

    #[test]
    fn snapshot_clamps_and_derives_active() {
        let mut raw = wire("X", Some("XX"), None);
        raw.cases = Some(100.0);
        raw.deaths = Some(10.0);
        raw.recovered = Some(30.0);
        let s = snapshot("XX", raw.clone(), None).unwrap();
        assert_eq!(s.active, 60);

        raw.active = Some(500.0);
        let s = snapshot("XX", raw.clone(), Some(9)).unwrap();
        assert_eq!(s.active, 100);
        assert_eq!(s.vaccinations, Some(9));

        raw.active = Some(-4.0);
        assert_eq!(snapshot("XX", raw, None).unwrap().active, 0);
    }

    #[test]
    fn snapshot_without_name_is_decode_error() {
        let err = snapshot("XX", CountryWire::default(), None).unwrap_err();
        assert!(matches!(err, OutbreakError::Decode { .. }));
    }

    #[test]
    fn series_orders_dates_and_defaults_recovered() {
        let tl: TimelineWire = serde_json::from_str(
            r#"{"cases":{"1/10/21":30,"1/9/21":20,"12/31/20":10},"deaths":{"1/9/21":2,"1/10/21":3},"recovered":{"1/10/21":5}}"#,
        )
        .unwrap();
        let s = series("X", "XX", &tl).unwrap();
        let cases: Vec<u64> = s.points.iter().map(|p| p.cases).collect();
        assert_eq!(cases, vec![10, 20, 30]);
        assert_eq!(s.points[0].deaths, 0);
        assert_eq!(s.points[2].recovered, 5);
        assert_eq!(s.points[1].recovered, 0);
    }

    #[test]
    fn series_rejects_garbage_keys() {
        let tl: TimelineWire = serde_json::from_str(r#"{"cases":{"soon":1},"deaths":{}}"#).unwrap();
        assert!(matches!(series("X", "XX", &tl), Err(OutbreakError::Decode { .. })));
    }
}
