use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
///
/// These map one-to-one with provider role traits and allow consistent
/// Display formatting in error messages and spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Catalog of selectable countries.
    Countries,
    /// Point-in-time statistics for one country.
    Snapshot,
    /// Per-day cumulative series for one country.
    History,
    /// Per-day cumulative series for the whole world.
    GlobalHistory,
    /// Vaccination coverage for one country.
    VaccineCoverage,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Countries => "countries",
            Self::Snapshot => "snapshot",
            Self::History => "history",
            Self::GlobalHistory => "global-history",
            Self::VaccineCoverage => "vaccine-coverage",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
