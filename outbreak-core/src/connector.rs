use async_trait::async_trait;

use crate::OutbreakError;
use crate::types::{CountryListItem, CountrySnapshot, HistoricalSeries};
pub use outbreak_types::ConnectorKey;

/// Focused role trait for connectors that list the countries they cover.
#[async_trait]
pub trait CountriesProvider: Send + Sync {
    /// Fetch the country catalog, sorted by display name and unique by code.
    async fn countries(&self) -> Result<Vec<CountryListItem>, OutbreakError>;
}

/// Focused role trait for connectors that provide point-in-time country statistics.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Fetch the current snapshot for the country with `code`.
    async fn snapshot(&self, code: &str) -> Result<CountrySnapshot, OutbreakError>;
}

/// Focused role trait for connectors that provide per-country daily history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch the last `days` days of cumulative counts for the country with `code`.
    ///
    /// Implementations must reject `days == 0` and blank codes with `InvalidArg`
    /// before issuing any request.
    async fn history(&self, code: &str, days: u32) -> Result<HistoricalSeries, OutbreakError>;
}

/// Focused role trait for connectors that provide worldwide aggregated history.
#[async_trait]
pub trait GlobalHistoryProvider: Send + Sync {
    /// Fetch the last `days` days of worldwide cumulative counts.
    async fn global_history(&self, days: u32) -> Result<HistoricalSeries, OutbreakError>;
}

/// Focused role trait for connectors that report vaccine doses administered.
#[async_trait]
pub trait VaccineCoverageProvider: Send + Sync {
    /// Latest total doses for `code`, or `None` when the provider has no figure.
    async fn vaccine_coverage(&self, code: &str) -> Result<Option<u64>, OutbreakError>;
}

/// Primary connector interface. A connector advertises each capability by
/// returning a trait object from the matching `as_*` accessor.
pub trait OutbreakConnector: Send + Sync {
    /// A stable identifier used in error messages and priority lists (e.g., "outbreak-disease-sh").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// If implemented, returns a trait object for the country catalog.
    fn as_countries_provider(&self) -> Option<&dyn CountriesProvider> {
        None
    }

    /// If implemented, returns a trait object for country snapshots.
    fn as_snapshot_provider(&self) -> Option<&dyn SnapshotProvider> {
        None
    }

    /// If implemented, returns a trait object for country history.
    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        None
    }
    /// If implemented, returns a trait object for worldwide history.
    fn as_global_history_provider(&self) -> Option<&dyn GlobalHistoryProvider> {
        None
    }
    /// If implemented, returns a trait object for vaccine coverage.
    fn as_vaccine_coverage_provider(&self) -> Option<&dyn VaccineCoverageProvider> {
        None
    }
}
