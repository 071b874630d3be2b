use std::sync::Arc;

use outbreak_core::{
    ChartMode, ComparisonChart, CountryListItem, MetricKey, OutbreakError, Selection,
    SummaryStats, TrendChart, build_comparison_chart, build_trend_chart,
};
use tokio::sync::{Mutex, MutexGuard, watch};
use tokio_util::sync::CancellationToken;

use super::state::{DashboardState, Phase};
use crate::{BatchOutcome, Outbreak};

#[derive(Default)]
struct Control {
    batch: u64,
    token: Option<CancellationToken>,
    selection: Selection,
}

struct Shared {
    outbreak: Arc<Outbreak>,
    state: watch::Sender<DashboardState>,
    control: Mutex<Control>,
}

impl Shared {
    /// Publish `outcome` unless `batch` has been superseded. Returns whether it was
    /// published.
    fn publish(
        &self,
        batch: u64,
        token: &CancellationToken,
        outcome: Result<BatchOutcome, OutbreakError>,
    ) -> bool {
        self.state.send_if_modified(|s| {
            if token.is_cancelled() || s.batch != batch {
                return false;
            }
            match outcome {
                Ok(out) => {
                    s.phase = Phase::from_outcome(&out);
                    s.error_message = out.first_error().map(ToString::to_string);
                    s.snapshots = out.snapshots;
                    s.series = out.series;
                }
                Err(e) => {
                    s.phase = Phase::Failure;
                    s.error_message = Some(e.to_string());
                    s.snapshots.clear();
                    s.series.clear();
                }
            }
            true
        })
    }
}

/// Loads the selected countries and publishes the result.
///
/// Every [`select`](Self::select) opens a new batch and supersedes the previous
/// one: a superseded batch stops waiting on its calls and its results are never
/// published, whatever order the batches finish in. Readers either poll
/// [`state`](Self::state) or [`subscribe`](Self::subscribe) to changes.
///
/// Batches run on spawned tasks, so a Tokio runtime must be running.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<Shared>,
}

impl Dashboard {
    /// Create an idle dashboard backed by `outbreak`.
    #[must_use]
    pub fn new(outbreak: Arc<Outbreak>) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            inner: Arc::new(Shared {
                outbreak,
                state,
                control: Mutex::new(Control::default()),
            }),
        }
    }

    /// The orchestrator this dashboard loads through.
    #[must_use]
    pub fn outbreak(&self) -> &Outbreak {
        &self.inner.outbreak
    }

    /// Fetch the country catalog to pick selections from.
    ///
    /// # Errors
    /// Returns an error if no connector can list countries.
    pub async fn countries(&self) -> Result<Vec<CountryListItem>, OutbreakError> {
        self.inner.outbreak.countries().await
    }

    /// Replace the selection and start loading it. Returns the new batch id.
    ///
    /// An empty selection publishes an empty `Idle` state right away and makes no
    /// calls. Otherwise the state moves to `Loading` before this returns; previous
    /// data stays visible until the batch settles.
    pub async fn select(&self, selection: Selection) -> u64 {
        let mut ctl = self.inner.control.lock().await;
        self.open_batch(&mut ctl, selection)
    }

    /// Load the current selection again, whatever the current phase.
    pub async fn retry(&self) -> u64 {
        let mut ctl = self.inner.control.lock().await;
        let selection = ctl.selection.clone();
        self.open_batch(&mut ctl, selection)
    }

    /// Supersede the running batch and start one for `selection`. Runs under the
    /// control lock so batch ids and selections change together.
    fn open_batch(&self, ctl: &mut MutexGuard<'_, Control>, selection: Selection) -> u64 {
        if let Some(prev) = ctl.token.take() {
            prev.cancel();
        }
        ctl.batch += 1;
        let batch = ctl.batch;
        ctl.selection = selection.clone();

        if selection.is_empty() {
            self.inner.state.send_modify(|s| {
                s.batch = batch;
                s.phase = Phase::Idle;
                s.selection = Selection::new();
                s.snapshots.clear();
                s.series.clear();
                s.error_message = None;
            });
            return batch;
        }

        let token = CancellationToken::new();
        ctl.token = Some(token.clone());
        self.inner.state.send_modify(|s| {
            s.batch = batch;
            s.phase = Phase::Loading;
            s.selection = selection.clone();
            s.error_message = None;
        });

        self.spawn_batch(batch, selection, token);
        batch
    }

    fn spawn_batch(&self, batch: u64, selection: Selection, token: CancellationToken) {
        let shared = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let worker = {
                let outbreak = Arc::clone(&shared.outbreak);
                let token = token.clone();
                tokio::spawn(async move { outbreak.load_selection(&selection, &token).await })
            };
            // a panicking batch settles as a failure
            let outcome = match worker.await {
                Ok(res) => res,
                Err(join_err) => Err(OutbreakError::Other(format!(
                    "batch task failed: {join_err}"
                ))),
            };
            if !shared.publish(batch, &token, outcome) {
                #[cfg(feature = "tracing")]
                tracing::debug!(batch, "dropped results of superseded batch");
            }
        });
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every published change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    /// Wait until no batch is in flight and return that state.
    pub async fn settled(&self) -> DashboardState {
        let mut rx = self.subscribe();
        match rx.wait_for(|s| !s.is_loading()).await {
            Ok(s) => s.clone(),
            Err(_) => self.state(),
        }
    }

    /// Change the charted metric. Does not reload anything.
    pub fn set_selected_metric(&self, metric: MetricKey) {
        self.inner.state.send_if_modified(|s| {
            if s.selected_metric == metric {
                return false;
            }
            s.selected_metric = metric;
            true
        });
    }

    /// Metric currently charted.
    #[must_use]
    pub fn selected_metric(&self) -> MetricKey {
        self.inner.state.borrow().selected_metric
    }

    /// Weekly trend lines of the selected metric over the published series.
    #[must_use]
    pub fn trend_chart(&self, mode: ChartMode) -> TrendChart {
        let s = self.inner.state.borrow();
        build_trend_chart(&s.series, s.selected_metric, mode)
    }

    /// Comparison bars of the selected metric over the published snapshots.
    #[must_use]
    pub fn comparison_chart(&self) -> ComparisonChart {
        let s = self.inner.state.borrow();
        build_comparison_chart(&s.snapshots, s.selected_metric)
    }

    /// Headline figures over the published snapshots.
    #[must_use]
    pub fn summary(&self) -> Option<SummaryStats> {
        self.inner.state.borrow().summary()
    }
}
