use outbreak_core::{Capability, CountrySnapshot, HistoricalSeries, OutbreakError, Selection};
use tokio_util::sync::CancellationToken;

use crate::Outbreak;

/// One failed call of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Country code the call was made for.
    pub code: String,
    /// Which call failed.
    pub capability: Capability,
    /// The failure.
    pub error: OutbreakError,
}

/// Everything one selection load produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Successful snapshots, in selection order.
    pub snapshots: Vec<CountrySnapshot>,
    /// Successful histories, in selection order.
    pub series: Vec<HistoricalSeries>,
    /// Snapshot failures in selection order, then history failures in selection order.
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// The error surfaced to readers: the first entry of [`failures`](Self::failures).
    #[must_use]
    pub fn first_error(&self) -> Option<&OutbreakError> {
        self.failures.first().map(|f| &f.error)
    }

    /// True when no call failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// True when every call failed.
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        !self.failures.is_empty() && self.snapshots.is_empty() && self.series.is_empty()
    }
}

fn failures(capability: Capability, list: Vec<(String, OutbreakError)>) -> Vec<BatchFailure> {
    list.into_iter()
        .map(|(code, error)| BatchFailure {
            code,
            capability,
            error,
        })
        .collect()
}

impl Outbreak {
    /// Load snapshots and histories for every country of `selection`.
    ///
    /// All calls run concurrently; both joins wait for every call. Histories ask for
    /// the configured `history_days` and are named after the selected entry.
    ///
    /// # Errors
    /// Returns `Cancelled` if `token` fires before every call has completed. Calls
    /// already in flight are dropped.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "outbreak::load_selection",
            skip(self, selection, token),
            fields(countries = selection.len(), days = self.cfg.history_days),
        )
    )]
    pub async fn load_selection(
        &self,
        selection: &Selection,
        token: &CancellationToken,
    ) -> Result<BatchOutcome, OutbreakError> {
        if selection.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let codes: Vec<&str> = selection.iter().map(|c| c.code.as_str()).collect();
        let work = futures::future::join(
            self.snapshots(&codes),
            self.histories(&codes, self.cfg.history_days),
        );

        let ((snapshots, snapshot_failures), (mut series, history_failures)) = tokio::select! {
            biased;
            () = token.cancelled() => return Err(OutbreakError::Cancelled),
            out = work => out,
        };

        for s in &mut series {
            if let Some(item) = selection.iter().find(|c| c.code == s.code) {
                s.country_name.clone_from(&item.name);
            }
        }

        let mut all = failures(Capability::Snapshot, snapshot_failures);
        all.extend(failures(Capability::History, history_failures));
        Ok(BatchOutcome {
            snapshots,
            series,
            failures: all,
        })
    }
}
