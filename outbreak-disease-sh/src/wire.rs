//! Response shapes of the disease.sh v3 API.
//!
//! Every field is optional: the provider omits or nulls fields freely, and
//! normalization decides what a missing value means.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

/// Parse a timeline key. The provider uses `M/D/YY`; ISO dates are accepted too.
#[must_use]
pub fn parse_timeline_date(key: &str) -> Option<NaiveDate> {
    let key = key.trim();
    NaiveDate::parse_from_str(key, "%m/%d/%y")
        .or_else(|_| NaiveDate::parse_from_str(key, "%Y-%m-%d"))
        .ok()
}

/// `countryInfo` object nested in each country entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CountryInfoWire {
    /// ISO 3166-1 alpha-2 code.
    #[serde(default)]
    pub iso2: Option<String>,
    /// ISO 3166-1 alpha-3 code.
    #[serde(default)]
    pub iso3: Option<String>,
    /// Flag image URL.
    #[serde(default)]
    pub flag: Option<String>,
}

/// One entry of `GET /countries`, or the body of `GET /countries/{code}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountryWire {
    /// Display name.
    pub country: Option<String>,
    /// Identifiers and flag.
    pub country_info: Option<CountryInfoWire>,
    /// Update time in epoch milliseconds.
    pub updated: Option<i64>,
    /// Cumulative cases.
    pub cases: Option<f64>,
    /// Cases reported today.
    pub today_cases: Option<f64>,
    /// Cumulative deaths.
    pub deaths: Option<f64>,
    /// Deaths reported today.
    pub today_deaths: Option<f64>,
    /// Cumulative recoveries.
    pub recovered: Option<f64>,
    /// Active cases.
    pub active: Option<f64>,
    /// Critical cases.
    pub critical: Option<f64>,
    /// Tests performed.
    pub tests: Option<f64>,
    /// Population estimate.
    pub population: Option<f64>,
    /// Continent name.
    pub continent: Option<String>,
}

/// Date-keyed cumulative counts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimelineWire {
    /// Cases per date key; this map defines the date axis.
    pub cases: BTreeMap<String, f64>,
    /// Deaths per date key.
    pub deaths: BTreeMap<String, f64>,
    /// Recoveries per date key. The provider stopped publishing these for most
    /// countries, so the map may be missing or sparse.
    pub recovered: Option<BTreeMap<String, f64>>,
}

/// Body of `GET /historical/{code}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistoricalWire {
    /// Display name.
    #[serde(default)]
    pub country: Option<String>,
    /// Cumulative counts.
    #[serde(default)]
    pub timeline: TimelineWire,
}

/// Entry of a vaccine timeline returned with `fullData=true`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VaccineEntryWire {
    /// Total doses administered up to `date`.
    pub total: Option<f64>,
    /// Doses administered on `date`.
    pub daily: Option<f64>,
    /// Date key.
    pub date: Option<String>,
}

/// Vaccine timeline in either provider shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VaccineTimelineWire {
    /// `fullData=false`: date key to total doses.
    Totals(BTreeMap<String, f64>),
    /// `fullData=true`: list of entries.
    Entries(Vec<VaccineEntryWire>),
}

/// Body of `GET /vaccine/coverage/countries/{code}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VaccineCoverageWire {
    /// `{ "country": ..., "timeline": ... }`.
    Wrapped {
        /// Display name.
        #[serde(default)]
        country: Option<String>,
        /// Dose totals.
        timeline: VaccineTimelineWire,
    },
    /// A bare timeline.
    Bare(VaccineTimelineWire),
}

impl VaccineTimelineWire {
    /// Total doses on the most recent dated entry.
    ///
    /// Undated entries are only used when no entry carries a parseable date; then
    /// the last one wins.
    #[must_use]
    pub fn latest_total(&self) -> Option<f64> {
        let rows: Vec<(Option<NaiveDate>, Option<f64>)> = match self {
            Self::Totals(map) => map
                .iter()
                .map(|(k, v)| (parse_timeline_date(k), Some(*v)))
                .collect(),
            Self::Entries(list) => list
                .iter()
                .map(|e| (e.date.as_deref().and_then(parse_timeline_date), e.total))
                .collect(),
        };
        let dated = rows
            .iter()
            .filter_map(|(d, v)| Some((d.as_ref()?, v.as_ref()?)))
            .max_by_key(|(d, _)| **d);
        match dated {
            Some((_, v)) => Some(*v),
            None => rows.iter().rev().find_map(|(_, v)| *v),
        }
    }
}

impl VaccineCoverageWire {
    /// See [`VaccineTimelineWire::latest_total`].
    #[must_use]
    pub fn latest_total(&self) -> Option<f64> {
        match self {
            Self::Wrapped { timeline, .. } | Self::Bare(timeline) => timeline.latest_total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_keys_parse() {
        assert_eq!(
            parse_timeline_date("1/22/20"),
            NaiveDate::from_ymd_opt(2020, 1, 22)
        );
        assert_eq!(
            parse_timeline_date("12/3/22"),
            NaiveDate::from_ymd_opt(2022, 12, 3)
        );
        assert_eq!(
            parse_timeline_date("2021-06-01"),
            NaiveDate::from_ymd_opt(2021, 6, 1)
        );
        assert_eq!(parse_timeline_date("yesterday"), None);
    }

    #[test]
    fn vaccine_shapes_decode() {
        let totals: VaccineCoverageWire = serde_json::from_str(
            r#"{"country":"France","timeline":{"12/31/22":100,"1/1/23":150}}"#,
        )
        .unwrap();
        // string order would put "1/1/23" first
        assert_eq!(totals.latest_total(), Some(150.0));

        let entries: VaccineCoverageWire = serde_json::from_str(
            r#"{"country":"France","timeline":[{"total":5,"daily":1,"date":"3/2/21"},{"total":4,"daily":1,"date":"3/1/21"}]}"#,
        )
        .unwrap();
        assert_eq!(entries.latest_total(), Some(5.0));

        let bare: VaccineCoverageWire =
            serde_json::from_str(r#"[{"total":7,"date":"3/1/21"}]"#).unwrap();
        assert_eq!(bare.latest_total(), Some(7.0));

        let empty: VaccineCoverageWire =
            serde_json::from_str(r#"{"country":"X","timeline":{}}"#).unwrap();
        assert_eq!(empty.latest_total(), None);
    }

    #[test]
    fn country_tolerates_nulls() {
        let c: CountryWire = serde_json::from_str(
            r#"{"country":"Diamond Princess","countryInfo":{"_id":null,"iso2":null,"iso3":null,"lat":0,"long":0,"flag":"x.png"},"cases":712,"recovered":null}"#,
        )
        .unwrap();
        assert_eq!(c.cases, Some(712.0));
        assert_eq!(c.recovered, None);
        assert_eq!(c.country_info.unwrap().iso2, None);
    }
}
