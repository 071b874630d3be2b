#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use outbreak_types::{Capability, OutbreakError};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{DEFAULT_BASE_URL, DiseaseShConfig};
use crate::wire::{CountryWire, HistoricalWire, TimelineWire, VaccineCoverageWire};

const CONNECTOR: &str = "outbreak-disease-sh";

/// Country catalog abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait DsCountries: Send + Sync {
    /// Fetch every country entry.
    async fn countries(&self) -> Result<Vec<CountryWire>, OutbreakError>;
}

/// Per-country snapshot abstraction.
#[async_trait]
pub trait DsSnapshot: Send + Sync {
    /// Fetch the current entry for `code`.
    async fn country(&self, code: &str) -> Result<CountryWire, OutbreakError>;
}

/// Historical timeline abstraction.
#[async_trait]
pub trait DsHistory: Send + Sync {
    /// Fetch the last `days` days for `code`.
    async fn historical(&self, code: &str, days: u32) -> Result<HistoricalWire, OutbreakError>;

    /// Fetch the last `days` days of worldwide totals. Default returns `unsupported`.
    async fn historical_all(&self, _days: u32) -> Result<TimelineWire, OutbreakError> {
        Err(OutbreakError::unsupported(Capability::GlobalHistory.as_str()))
    }
}

/// Vaccine coverage abstraction.
#[async_trait]
pub trait DsVaccine: Send + Sync {
    /// Fetch the most recent dose totals for `code`.
    async fn coverage(&self, code: &str) -> Result<VaccineCoverageWire, OutbreakError>;
}

/// Real adapter backed by a single `reqwest::Client`.
/// `reqwest::Client` is `Clone + Send + Sync` and pools connections internally.
#[derive(Clone)]
pub struct RealAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl RealAdapter {
    /// Adapter for the public API with default client settings.
    #[must_use]
    pub fn new_default() -> Self {
        Self::try_new(&DiseaseShConfig::default())
            .unwrap_or_else(|_| Self::with_client(reqwest::Client::new(), DEFAULT_BASE_URL))
    }

    /// Build a client from `config`.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unusable base URL and `Other` if the HTTP client
    /// cannot be constructed.
    pub fn try_new(config: &DiseaseShConfig) -> Result<Self, OutbreakError> {
        let base = parse_base(&config.base_url)?;
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| OutbreakError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base.into(),
        })
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build `{base}/{segments...}?{query}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, OutbreakError> {
        let mut url = parse_base(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| {
                OutbreakError::InvalidArg(format!("base url cannot take a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        capability: Capability,
    ) -> Result<T, OutbreakError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_err(&e, capability))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(OutbreakError::http(CONNECTOR, status.as_u16()));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| map_reqwest_err(&e, capability))?;
        serde_json::from_slice(&body)
            .map_err(|e| OutbreakError::decode(CONNECTOR, format!("{capability}: {e}")))
    }
}

fn parse_base(base_url: &str) -> Result<Url, OutbreakError> {
    Url::parse(base_url)
        .map_err(|e| OutbreakError::InvalidArg(format!("invalid base url {base_url}: {e}")))
}

fn map_reqwest_err(e: &reqwest::Error, capability: Capability) -> OutbreakError {
    if e.is_timeout() {
        OutbreakError::provider_timeout(CONNECTOR, capability.as_str())
    } else if e.is_decode() {
        OutbreakError::decode(CONNECTOR, e.to_string())
    } else {
        OutbreakError::transport(CONNECTOR, e.to_string())
    }
}

#[async_trait]
impl DsCountries for RealAdapter {
    async fn countries(&self) -> Result<Vec<CountryWire>, OutbreakError> {
        let url = self.endpoint(&["countries"], &[])?;
        self.get_json(url, Capability::Countries).await
    }
}

#[async_trait]
impl DsSnapshot for RealAdapter {
    async fn country(&self, code: &str) -> Result<CountryWire, OutbreakError> {
        let url = self.endpoint(&["countries", code], &[])?;
        self.get_json(url, Capability::Snapshot).await
    }
}

#[async_trait]
impl DsHistory for RealAdapter {
    async fn historical(&self, code: &str, days: u32) -> Result<HistoricalWire, OutbreakError> {
        let url = self.endpoint(&["historical", code], &[("lastdays", days.to_string())])?;
        self.get_json(url, Capability::History).await
    }

    async fn historical_all(&self, days: u32) -> Result<TimelineWire, OutbreakError> {
        let url = self.endpoint(&["historical", "all"], &[("lastdays", days.to_string())])?;
        self.get_json(url, Capability::GlobalHistory).await
    }
}

#[async_trait]
impl DsVaccine for RealAdapter {
    async fn coverage(&self, code: &str) -> Result<VaccineCoverageWire, OutbreakError> {
        let url = self.endpoint(
            &["vaccine", "coverage", "countries", code],
            &[("lastdays", "1".to_string()), ("fullData", "false".to_string())],
        )?;
        self.get_json(url, Capability::VaccineCoverage).await
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn DsCountries {
    /// Build a `DsCountries` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn DsCountries>
    where
        F: Send + Sync + 'static + Fn() -> Result<Vec<CountryWire>, OutbreakError>,
    {
        struct FnCountries<F>(F);
        #[async_trait]
        impl<F> DsCountries for FnCountries<F>
        where
            F: Send + Sync + 'static + Fn() -> Result<Vec<CountryWire>, OutbreakError>,
        {
            async fn countries(&self) -> Result<Vec<CountryWire>, OutbreakError> {
                (self.0)()
            }
        }
        Arc::new(FnCountries(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn DsSnapshot {
    /// Build a `DsSnapshot` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn DsSnapshot>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<CountryWire, OutbreakError>,
    {
        struct FnSnapshot<F>(F);
        #[async_trait]
        impl<F> DsSnapshot for FnSnapshot<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<CountryWire, OutbreakError>,
        {
            async fn country(&self, code: &str) -> Result<CountryWire, OutbreakError> {
                (self.0)(code.to_string())
            }
        }
        Arc::new(FnSnapshot(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn DsHistory {
    /// Build a `DsHistory` from per-country and worldwide closures (tests only).
    pub fn from_fns<FH, FA>(fh: FH, fa: FA) -> Arc<dyn DsHistory>
    where
        FH: Send + Sync + 'static + Fn(String, u32) -> Result<HistoricalWire, OutbreakError>,
        FA: Send + Sync + 'static + Fn(u32) -> Result<TimelineWire, OutbreakError>,
    {
        struct FnHistory<FH, FA> {
            fh: FH,
            fa: FA,
        }
        #[async_trait]
        impl<FH, FA> DsHistory for FnHistory<FH, FA>
        where
            FH: Send + Sync + 'static + Fn(String, u32) -> Result<HistoricalWire, OutbreakError>,
            FA: Send + Sync + 'static + Fn(u32) -> Result<TimelineWire, OutbreakError>,
        {
            async fn historical(
                &self,
                code: &str,
                days: u32,
            ) -> Result<HistoricalWire, OutbreakError> {
                (self.fh)(code.to_string(), days)
            }

            async fn historical_all(&self, days: u32) -> Result<TimelineWire, OutbreakError> {
                (self.fa)(days)
            }
        }
        Arc::new(FnHistory { fh, fa })
    }

    /// Build a `DsHistory` with only the per-country closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn DsHistory>
    where
        F: Send + Sync + 'static + Fn(String, u32) -> Result<HistoricalWire, OutbreakError>,
    {
        Self::from_fns(f, |_| {
            Err(OutbreakError::unsupported(Capability::GlobalHistory.as_str()))
        })
    }
}

#[cfg(feature = "test-adapters")]
impl dyn DsVaccine {
    /// Build a `DsVaccine` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn DsVaccine>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<VaccineCoverageWire, OutbreakError>,
    {
        struct FnVaccine<F>(F);
        #[async_trait]
        impl<F> DsVaccine for FnVaccine<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<VaccineCoverageWire, OutbreakError>,
        {
            async fn coverage(&self, code: &str) -> Result<VaccineCoverageWire, OutbreakError> {
                (self.0)(code.to_string())
            }
        }
        Arc::new(FnVaccine(f))
    }
}

/// Helper trait to split a concrete adapter into arc trait objects.
#[cfg(feature = "test-adapters")]
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn DsCountries>`.
    fn clone_arc_countries(&self) -> Arc<dyn DsCountries> {
        <dyn DsCountries>::from_fn(|| Err(OutbreakError::unsupported("countries")))
    }
    /// Clone as `Arc<dyn DsSnapshot>`.
    fn clone_arc_snapshot(&self) -> Arc<dyn DsSnapshot> {
        <dyn DsSnapshot>::from_fn(|_| Err(OutbreakError::unsupported("snapshot")))
    }
    /// Clone as `Arc<dyn DsHistory>`.
    fn clone_arc_history(&self) -> Arc<dyn DsHistory> {
        <dyn DsHistory>::from_fn(|_, _| Err(OutbreakError::unsupported("history")))
    }
    /// Clone as `Arc<dyn DsVaccine>`.
    fn clone_arc_vaccine(&self) -> Arc<dyn DsVaccine> {
        <dyn DsVaccine>::from_fn(|_| Err(OutbreakError::unsupported("vaccine-coverage")))
    }
}

#[cfg(feature = "test-adapters")]
impl CloneArcAdapters for RealAdapter {
    fn clone_arc_countries(&self) -> Arc<dyn DsCountries> {
        Arc::new(self.clone()) as Arc<dyn DsCountries>
    }
    fn clone_arc_snapshot(&self) -> Arc<dyn DsSnapshot> {
        Arc::new(self.clone()) as Arc<dyn DsSnapshot>
    }
    fn clone_arc_history(&self) -> Arc<dyn DsHistory> {
        Arc::new(self.clone()) as Arc<dyn DsHistory>
    }
    fn clone_arc_vaccine(&self) -> Arc<dyn DsVaccine> {
        Arc::new(self.clone()) as Arc<dyn DsVaccine>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_segments_and_query() {
        let a = RealAdapter::with_client(reqwest::Client::new(), "https://example.org/v3/covid-19/");
        let url = a
            .endpoint(&["historical", "Côte d'Ivoire"], &[("lastdays", "30".into())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/v3/covid-19/historical/C%C3%B4te%20d'Ivoire?lastdays=30"
        );
        let url = a.endpoint(&["countries", "a/b"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/v3/covid-19/countries/a%2Fb");
    }

    #[test]
    fn bad_base_url_is_invalid_arg() {
        let cfg = DiseaseShConfig::default().with_base_url("not a url");
        assert!(matches!(
            RealAdapter::try_new(&cfg),
            Err(OutbreakError::InvalidArg(_))
        ));
    }
}
