//! Domain entities, plus re-exports of the shared `outbreak-types` primitives.

use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use outbreak_types::{
    Capability, ConnectorKey, DEFAULT_HISTORY_DAYS, ErrorKind, MAX_SELECTION, OutbreakConfig,
    OutbreakError, StatusCategory,
};

/// One selectable entry of the provider's country catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryListItem {
    /// Display name, e.g. "France".
    pub name: String,
    /// Lookup key for subsequent snapshot/history queries (ISO2, falling back to ISO3).
    pub code: String,
    /// ISO 3166-1 alpha-2 code, when the provider knows it.
    pub iso2: Option<String>,
    /// ISO 3166-1 alpha-3 code, when the provider knows it.
    pub iso3: Option<String>,
    /// URL of a flag image.
    pub flag_url: Option<String>,
}

impl CountryListItem {
    /// Build an entry with only a name and a lookup code.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            iso2: None,
            iso3: None,
            flag_url: None,
        }
    }
}

/// Point-in-time statistics for one country.
///
/// Invariant: `active <= cases`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySnapshot {
    /// Display name as reported by the provider.
    pub country: String,
    /// Lookup code the snapshot was requested with.
    pub code: String,
    /// Continent name.
    pub continent: Option<String>,
    /// URL of a flag image.
    pub flag_url: Option<String>,
    /// Provider-side update time, milliseconds since the Unix epoch.
    pub updated_at_epoch_ms: i64,
    /// Cumulative confirmed cases.
    pub cases: u64,
    /// Cumulative deaths.
    pub deaths: u64,
    /// Currently active cases.
    pub active: u64,
    /// Cumulative recoveries.
    pub recovered: Option<u64>,
    /// Cumulative tests performed.
    pub tests: Option<u64>,
    /// Total vaccine doses administered.
    pub vaccinations: Option<u64>,
    /// Population estimate.
    pub population: Option<u64>,
    /// Cases reported today.
    pub today_cases: Option<u64>,
    /// Deaths reported today.
    pub today_deaths: Option<u64>,
    /// Patients in critical condition.
    pub critical: Option<u64>,
}

impl CountrySnapshot {
    /// `max(0, cases - deaths - recovered)`.
    #[must_use]
    pub const fn derive_active(cases: u64, deaths: u64, recovered: u64) -> u64 {
        cases.saturating_sub(deaths).saturating_sub(recovered)
    }

    /// Re-establish `active <= cases` after construction from raw provider data.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.active = self.active.min(self.cases);
        self
    }

    /// Value of `metric` for this snapshot, if the provider reported it.
    #[must_use]
    pub const fn metric(&self, metric: MetricKey) -> Option<u64> {
        match metric {
            MetricKey::Cases => Some(self.cases),
            MetricKey::Active => Some(self.active),
            MetricKey::Deaths => Some(self.deaths),
            MetricKey::Vaccinations => self.vaccinations,
        }
    }
}

/// One day of cumulative counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Cumulative confirmed cases up to `date`.
    pub cases: u64,
    /// Cumulative deaths up to `date`.
    pub deaths: u64,
    /// Cumulative recoveries up to `date`; 0 when the provider stopped reporting them.
    pub recovered: u64,
}

impl HistoricalPoint {
    /// Active cases derived from the cumulative counts, clamped at zero.
    #[must_use]
    pub const fn active(&self) -> u64 {
        CountrySnapshot::derive_active(self.cases, self.deaths, self.recovered)
    }

    /// Value of `metric` on this day. Historical series carry no vaccination counts.
    #[must_use]
    pub const fn value(&self, metric: MetricKey) -> u64 {
        match metric {
            MetricKey::Cases => self.cases,
            MetricKey::Active => self.active(),
            MetricKey::Deaths => self.deaths,
            MetricKey::Vaccinations => 0,
        }
    }
}

/// Ordered per-day series of cumulative counts for one country.
///
/// Invariant: `points` are strictly ascending by `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    /// Display name of the country (or "Global").
    pub country_name: String,
    /// Lookup code the series was requested with.
    pub code: String,
    /// Chronologically ascending points with unique dates.
    pub points: Vec<HistoricalPoint>,
}

impl HistoricalSeries {
    /// Build a series, sorting points by date and keeping the last point seen for a
    /// repeated date.
    pub fn new(
        country_name: impl Into<String>,
        code: impl Into<String>,
        mut points: Vec<HistoricalPoint>,
    ) -> Self {
        points.sort_by_key(|p| p.date);
        let mut out: Vec<HistoricalPoint> = Vec::with_capacity(points.len());
        for p in points {
            match out.last_mut() {
                Some(last) if last.date == p.date => *last = p,
                _ => out.push(p),
            }
        }
        Self {
            country_name: country_name.into(),
            code: code.into(),
            points: out,
        }
    }

    /// Dates of all points, ascending.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Ordered set of at most [`MAX_SELECTION`] countries, unique by code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    items: Vec<CountryListItem>,
}

impl Selection {
    /// An empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a selection from an ordered list of countries.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the list holds more than [`MAX_SELECTION`] entries or
    /// repeats a code.
    pub fn try_from_items(
        items: impl IntoIterator<Item = CountryListItem>,
    ) -> Result<Self, OutbreakError> {
        let mut sel = Self::new();
        for item in items {
            sel.push(item)?;
        }
        Ok(sel)
    }

    /// Append a country. Its code is stored trimmed.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the code is blank, the selection is full or it
    /// already holds the code.
    pub fn push(&mut self, mut item: CountryListItem) -> Result<(), OutbreakError> {
        let code = crate::validate::validate_code(&item.code)?;
        if code.len() != item.code.len() {
            item.code = code.to_string();
        }
        if self.contains(&item.code) {
            return Err(OutbreakError::InvalidArg(format!(
                "country {} is already selected",
                item.code
            )));
        }
        if self.items.len() >= MAX_SELECTION {
            return Err(OutbreakError::InvalidArg(format!(
                "at most {MAX_SELECTION} countries can be compared"
            )));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove the country with `code`, returning it if it was selected.
    pub fn remove(&mut self, code: &str) -> Option<CountryListItem> {
        let idx = self.items.iter().position(|i| i.code == code)?;
        Some(self.items.remove(idx))
    }

    /// True if a country with `code` is selected.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.items.iter().any(|i| i.code == code)
    }

    /// Selected countries in selection order.
    #[must_use]
    pub fn items(&self) -> &[CountryListItem] {
        &self.items
    }

    /// Iterate over selected countries in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &CountryListItem> {
        self.items.iter()
    }

    /// Number of selected countries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when no more countries can be added.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_SELECTION
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a CountryListItem;
    type IntoIter = std::slice::Iter<'a, CountryListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Statistic shown on comparison and trend charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    /// Cumulative confirmed cases.
    #[default]
    Cases,
    /// Currently active cases.
    Active,
    /// Cumulative deaths.
    Deaths,
    /// Vaccine doses administered.
    Vaccinations,
}

impl MetricKey {
    /// Every metric, in display order.
    pub const ALL: [Self; 4] = [Self::Cases, Self::Active, Self::Deaths, Self::Vaccinations];

    /// Chart legend label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cases => "Total Cases",
            Self::Active => "Active Cases",
            Self::Deaths => "Deaths",
            Self::Vaccinations => "Vaccinations",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How trend values are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// New counts per day (deltas of the cumulative series).
    #[default]
    Daily,
    /// Raw cumulative counts.
    Cumulative,
}
