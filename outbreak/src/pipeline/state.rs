use outbreak_core::{
    CountrySnapshot, HistoricalSeries, MetricKey, Selection, SummaryStats, summarize,
};
use serde::{Deserialize, Serialize};

use crate::BatchOutcome;

/// Where the dashboard is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing selected.
    #[default]
    Idle,
    /// A batch is in flight. Data from the previous batch stays visible.
    Loading,
    /// Every call of the last batch succeeded.
    Success,
    /// Some calls of the last batch failed and some succeeded.
    PartialSuccess,
    /// Every call of the last batch failed.
    Failure,
}

impl Phase {
    /// Phase reached once `outcome` is published.
    #[must_use]
    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        if outcome.is_complete() {
            Self::Success
        } else if outcome.is_total_failure() {
            Self::Failure
        } else {
            Self::PartialSuccess
        }
    }

    /// True while a batch is in flight.
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// State published to readers after every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    /// Id of the batch this state belongs to; 0 before the first selection.
    pub batch: u64,
    /// Load phase.
    pub phase: Phase,
    /// Countries the current batch was opened for.
    pub selection: Selection,
    /// Successful snapshots, in selection order.
    pub snapshots: Vec<CountrySnapshot>,
    /// Successful histories, in selection order.
    pub series: Vec<HistoricalSeries>,
    /// First error of the last batch, if any.
    pub error_message: Option<String>,
    /// Metric shown on the charts.
    pub selected_metric: MetricKey,
}

impl DashboardState {
    /// True while a batch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// Headline figures over the published snapshots.
    #[must_use]
    pub fn summary(&self) -> Option<SummaryStats> {
        summarize(&self.snapshots)
    }
}
