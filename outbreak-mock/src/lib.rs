//! outbreak-mock
//!
//! Connectors for tests and demos that never touch the network.
//!
//! - [`MockConnector`] serves deterministic fixtures for ten countries. The codes
//!   `FAIL` and `SLOW` are reserved: the first fails every call, the second answers
//!   after a short delay.
//! - [`DynamicMockConnector`] defers every call to a [`DynamicMockController`] so a
//!   test can script returns, failures, hangs, gates, and panics per country.
use std::time::Duration;

use async_trait::async_trait;
use outbreak_core::connector::{
    CountriesProvider, GlobalHistoryProvider, HistoryProvider, OutbreakConnector,
    SnapshotProvider, VaccineCoverageProvider,
};
use outbreak_core::validate::{validate_code, validate_days};
use outbreak_core::{CountryListItem, CountrySnapshot, HistoricalSeries, OutbreakError};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, Gate, MockBehavior};

/// Code that makes every [`MockConnector`] call fail with a transport error.
pub const FAIL_CODE: &str = "FAIL";
/// Code that makes every [`MockConnector`] call answer after [`SLOW_DELAY`].
pub const SLOW_CODE: &str = "SLOW";
/// Delay applied to [`SLOW_CODE`] lookups.
pub const SLOW_DELAY: Duration = Duration::from_millis(200);

/// Mock connector for CI-safe demos. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    const NAME: &'static str = "outbreak-mock";

    fn not_found() -> OutbreakError {
        OutbreakError::http(Self::NAME, 404)
    }

    async fn maybe_fail_or_slow(code: &str, capability: &'static str) -> Result<(), OutbreakError> {
        match code {
            FAIL_CODE => Err(OutbreakError::transport(
                Self::NAME,
                format!("forced failure: {capability}"),
            )),
            SLOW_CODE => {
                tokio::time::sleep(SLOW_DELAY).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl OutbreakConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
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
impl CountriesProvider for MockConnector {
    async fn countries(&self) -> Result<Vec<CountryListItem>, OutbreakError> {
        Ok(fixtures::countries::all())
    }
}

#[async_trait]
impl SnapshotProvider for MockConnector {
    async fn snapshot(&self, code: &str) -> Result<CountrySnapshot, OutbreakError> {
        let code = validate_code(code)?;
        Self::maybe_fail_or_slow(code, "snapshot").await?;
        fixtures::snapshots::by_code(code).ok_or_else(Self::not_found)
    }
}

#[async_trait]
impl HistoryProvider for MockConnector {
    async fn history(&self, code: &str, days: u32) -> Result<HistoricalSeries, OutbreakError> {
        let code = validate_code(code)?;
        let days = validate_days(days)?;
        Self::maybe_fail_or_slow(code, "history").await?;
        fixtures::history::by_code(code, days).ok_or_else(Self::not_found)
    }
}

#[async_trait]
impl GlobalHistoryProvider for MockConnector {
    async fn global_history(&self, days: u32) -> Result<HistoricalSeries, OutbreakError> {
        let days = validate_days(days)?;
        Ok(fixtures::history::global(days))
    }
}

#[async_trait]
impl VaccineCoverageProvider for MockConnector {
    async fn vaccine_coverage(&self, code: &str) -> Result<Option<u64>, OutbreakError> {
        let code = validate_code(code)?;
        Self::maybe_fail_or_slow(code, "vaccine-coverage").await?;
        fixtures::snapshots::vaccinations(code).ok_or_else(Self::not_found)
    }
}
