//! outbreak-disease-sh
//!
//! Public connector that implements `OutbreakConnector` on top of the disease.sh
//! v3 REST API. Exposes the country catalog, country snapshots (with best-effort
//! vaccine coverage), per-country history, and worldwide history.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
/// Client configuration.
pub mod config;
mod normalize;
/// Provider response shapes.
pub mod wire;

use std::sync::Arc;

#[cfg(feature = "test-adapters")]
use adapter::CloneArcAdapters;
use adapter::{DsCountries, DsHistory, DsSnapshot, DsVaccine, RealAdapter};
use async_trait::async_trait;
pub use config::{DEFAULT_BASE_URL, DiseaseShConfig};
use outbreak_core::{
    CountryListItem, CountrySnapshot, HistoricalSeries, OutbreakError,
    connector::{
        ConnectorKey, CountriesProvider, GlobalHistoryProvider, HistoryProvider,
        OutbreakConnector, SnapshotProvider, VaccineCoverageProvider,
    },
    validate::{validate_code, validate_days},
};

#[cfg(not(feature = "test-adapters"))]
type AdapterArc = Arc<RealAdapter>;

#[cfg(feature = "test-adapters")]
type CountriesAdapter = Arc<dyn DsCountries>;
#[cfg(not(feature = "test-adapters"))]
type CountriesAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type SnapshotAdapter = Arc<dyn DsSnapshot>;
#[cfg(not(feature = "test-adapters"))]
type SnapshotAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type HistoryAdapter = Arc<dyn DsHistory>;
#[cfg(not(feature = "test-adapters"))]
type HistoryAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type VaccineAdapter = Arc<dyn DsVaccine>;
#[cfg(not(feature = "test-adapters"))]
type VaccineAdapter = AdapterArc;

/// Series name used for worldwide history.
pub const GLOBAL_NAME: &str = "Global";
/// Series code used for worldwide history.
pub const GLOBAL_CODE: &str = "ALL";

/// Public connector type. Production users will construct with `DiseaseShConnector::new_default()`.
pub struct DiseaseShConnector {
    countries: CountriesAdapter,
    snapshot: SnapshotAdapter,
    history: HistoryAdapter,
    vaccine: VaccineAdapter,
}

impl DiseaseShConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("outbreak-disease-sh");

    /// Build against the public API with default settings.
    #[must_use]
    pub fn new_default() -> Self {
        let a = RealAdapter::new_default();
        Self::from_real(&a)
    }

    /// Build from an explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn try_new(config: &DiseaseShConfig) -> Result<Self, OutbreakError> {
        let a = RealAdapter::try_new(config)?;
        Ok(Self::from_real(&a))
    }

    /// Build from an existing `reqwest::Client`.
    #[must_use]
    pub fn new_with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let a = RealAdapter::with_client(client, base_url);
        Self::from_real(&a)
    }

    #[cfg(feature = "test-adapters")]
    fn from_real(adapter: &RealAdapter) -> Self {
        Self::from_adapter(adapter)
    }

    #[cfg(not(feature = "test-adapters"))]
    fn from_real(adapter: &RealAdapter) -> Self {
        let shared = Arc::new(adapter.clone());
        Self {
            countries: Arc::clone(&shared),
            snapshot: Arc::clone(&shared),
            history: Arc::clone(&shared),
            vaccine: shared,
        }
    }

    /// For tests/injection (requires the `test-adapters` feature).
    ///
    /// Accepts a borrowed adapter to avoid unnecessary moves.
    #[cfg(feature = "test-adapters")]
    pub fn from_adapter<A: CloneArcAdapters + 'static>(adapter: &A) -> Self {
        Self {
            countries: adapter.clone_arc_countries(),
            snapshot: adapter.clone_arc_snapshot(),
            history: adapter.clone_arc_history(),
            vaccine: adapter.clone_arc_vaccine(),
        }
    }

    async fn latest_vaccinations(&self, code: &str) -> Result<Option<u64>, OutbreakError> {
        let raw = self.vaccine.coverage(code).await?;
        Ok(raw.latest_total().map(normalize::count))
    }
}

impl OutbreakConnector for DiseaseShConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "disease.sh"
    }

    fn as_countries_provider(&self) -> Option<&dyn CountriesProvider> {
        Some(self as &dyn CountriesProvider)
    }

    fn as_snapshot_provider(&self) -> Option<&dyn SnapshotProvider> {
        Some(self as &dyn SnapshotProvider)
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }

    fn as_global_history_provider(&self) -> Option<&dyn GlobalHistoryProvider> {
        Some(self as &dyn GlobalHistoryProvider)
    }

    fn as_vaccine_coverage_provider(&self) -> Option<&dyn VaccineCoverageProvider> {
        Some(self as &dyn VaccineCoverageProvider)
    }
}

#[async_trait]
impl CountriesProvider for DiseaseShConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "outbreak_disease_sh::countries", skip(self))
    )]
    async fn countries(&self) -> Result<Vec<CountryListItem>, OutbreakError> {
        let raw = self.countries.countries().await?;
        Ok(normalize::catalog(raw))
    }
}

#[async_trait]
impl SnapshotProvider for DiseaseShConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "outbreak_disease_sh::snapshot", skip(self), fields(code = %code))
    )]
    async fn snapshot(&self, code: &str) -> Result<CountrySnapshot, OutbreakError> {
        let code = validate_code(code)?;
        let (raw, vaccinations) =
            futures::future::join(self.snapshot.country(code), self.latest_vaccinations(code))
                .await;
        let raw = raw?;
        let vaccinations = match vaccinations {
            Ok(v) => v,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(code = %code, error = %err, "vaccine coverage unavailable");
                #[cfg(not(feature = "tracing"))]
                let _ = err;
                None
            }
        };
        normalize::snapshot(code, raw, vaccinations)
    }
}

#[async_trait]
impl HistoryProvider for DiseaseShConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "outbreak_disease_sh::history", skip(self), fields(code = %code, days = days))
    )]
    async fn history(&self, code: &str, days: u32) -> Result<HistoricalSeries, OutbreakError> {
        let code = validate_code(code)?;
        let days = validate_days(days)?;
        let raw = self.history.historical(code, days).await?;
        let name = raw.country.clone().unwrap_or_else(|| code.to_string());
        normalize::series(name, code, &raw.timeline)
    }
}

#[async_trait]
impl GlobalHistoryProvider for DiseaseShConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "outbreak_disease_sh::global_history", skip(self), fields(days = days))
    )]
    async fn global_history(&self, days: u32) -> Result<HistoricalSeries, OutbreakError> {
        let days = validate_days(days)?;
        let raw = self.history.historical_all(days).await?;
        normalize::series(GLOBAL_NAME, GLOBAL_CODE, &raw)
    }
}

#[async_trait]
impl VaccineCoverageProvider for DiseaseShConnector {
    async fn vaccine_coverage(&self, code: &str) -> Result<Option<u64>, OutbreakError> {
        let code = validate_code(code)?;
        self.latest_vaccinations(code).await
    }
}
