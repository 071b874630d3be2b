//! Configuration types shared across orchestrators and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Maximum number of countries a selection may hold.
pub const MAX_SELECTION: usize = 8;

/// Days of history requested per country when none is configured.
pub const DEFAULT_HISTORY_DAYS: u32 = 1500;

/// Global configuration for the `Outbreak` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutbreakConfig {
    /// Number of trailing days requested for each per-country history.
    pub history_days: u32,
    /// Optional timeout for individual provider requests.
    ///
    /// `None` waits indefinitely; a hung request then delays the whole batch.
    pub request_timeout: Option<Duration>,
}

impl Default for OutbreakConfig {
    fn default() -> Self {
        Self {
            history_days: DEFAULT_HISTORY_DAYS,
            request_timeout: None,
        }
    }
}
