use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Semaphore};

use outbreak_core::connector::{
    CountriesProvider, GlobalHistoryProvider, HistoryProvider, OutbreakConnector,
    SnapshotProvider,
};
use outbreak_core::{Capability, CountryListItem, CountrySnapshot, HistoricalSeries, OutbreakError};

/// A latch that holds gated calls until it is opened. Opening is permanent.
#[derive(Clone, Debug)]
pub struct Gate(Arc<Semaphore>);

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl Gate {
    /// A closed gate.
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(Semaphore::new(0)))
    }

    /// Release every current and future waiter.
    pub fn open(&self) {
        self.0.close();
    }

    async fn wait(&self) {
        // acquiring from a closed semaphore fails immediately
        let _ = self.0.acquire().await;
    }
}

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(OutbreakError),
    /// Hang indefinitely (simulate a stalled request).
    Hang,
    /// Wait until the gate opens, then return the value.
    Gated(Gate, T),
    /// Wait until the gate opens, then fail.
    GatedFail(Gate, OutbreakError),
    /// Panic with the given message.
    Panic(String),
}

impl<T> MockBehavior<T> {
    async fn run(self) -> Result<T, OutbreakError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Fail(e) => Err(e),
            Self::Hang => std::future::pending().await,
            Self::Gated(gate, v) => {
                gate.wait().await;
                Ok(v)
            }
            Self::GatedFail(gate, e) => {
                gate.wait().await;
                Err(e)
            }
            Self::Panic(msg) => panic!("{msg}"),
        }
    }
}

#[derive(Default)]
struct InternalState {
    countries_rule: Option<MockBehavior<Vec<CountryListItem>>>,
    snapshot_rules: HashMap<String, MockBehavior<CountrySnapshot>>,
    history_rules: HashMap<String, MockBehavior<HistoricalSeries>>,
    global_rule: Option<MockBehavior<HistoricalSeries>>,
    calls: HashMap<Capability, usize>,
    requests: Vec<(Capability, String)>,
}

impl InternalState {
    fn record(&mut self, capability: Capability, arg: &str) {
        *self.calls.entry(capability).or_default() += 1;
        self.requests.push((capability, arg.to_string()));
    }
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `countries` calls.
    pub async fn set_countries_behavior(&self, behavior: MockBehavior<Vec<CountryListItem>>) {
        let mut guard = self.state.lock().await;
        guard.countries_rule = Some(behavior);
    }

    /// Set the behavior for `snapshot` calls for a specific country code.
    pub async fn set_snapshot_behavior(
        &self,
        code: impl Into<String>,
        behavior: MockBehavior<CountrySnapshot>,
    ) {
        let mut guard = self.state.lock().await;
        guard.snapshot_rules.insert(code.into(), behavior);
    }

    /// Set the behavior for `history` calls for a specific country code.
    pub async fn set_history_behavior(
        &self,
        code: impl Into<String>,
        behavior: MockBehavior<HistoricalSeries>,
    ) {
        let mut guard = self.state.lock().await;
        guard.history_rules.insert(code.into(), behavior);
    }

    /// Set the behavior for `global_history` calls.
    pub async fn set_global_history_behavior(&self, behavior: MockBehavior<HistoricalSeries>) {
        let mut guard = self.state.lock().await;
        guard.global_rule = Some(behavior);
    }

    /// Number of calls received for `capability`.
    pub async fn call_count(&self, capability: Capability) -> usize {
        let guard = self.state.lock().await;
        guard.calls.get(&capability).copied().unwrap_or(0)
    }

    /// Total number of calls received across all capabilities.
    pub async fn total_calls(&self) -> usize {
        let guard = self.state.lock().await;
        guard.calls.values().sum()
    }

    /// Return a copy of the request log, in arrival order.
    pub async fn requests(&self) -> Vec<(Capability, String)> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn OutbreakConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn OutbreakConnector>, controller)
    }
}

impl OutbreakConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
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
}

#[async_trait]
impl CountriesProvider for DynamicMockConnector {
    async fn countries(&self) -> Result<Vec<CountryListItem>, OutbreakError> {
        // Acquire behavior snapshot without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.record(Capability::Countries, "");
            guard.countries_rule.clone()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Err(OutbreakError::unsupported(Capability::Countries.as_str())),
        }
    }
}

#[async_trait]
impl SnapshotProvider for DynamicMockConnector {
    async fn snapshot(&self, code: &str) -> Result<CountrySnapshot, OutbreakError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.record(Capability::Snapshot, code);
            guard.snapshot_rules.get(code).cloned()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Err(OutbreakError::unsupported(Capability::Snapshot.as_str())),
        }
    }
}

#[async_trait]
impl HistoryProvider for DynamicMockConnector {
    async fn history(&self, code: &str, days: u32) -> Result<HistoricalSeries, OutbreakError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.record(Capability::History, &format!("{code}?lastdays={days}"));
            guard.history_rules.get(code).cloned()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Err(OutbreakError::unsupported(Capability::History.as_str())),
        }
    }
}

#[async_trait]
impl GlobalHistoryProvider for DynamicMockConnector {
    async fn global_history(&self, days: u32) -> Result<HistoricalSeries, OutbreakError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.record(Capability::GlobalHistory, &format!("all?lastdays={days}"));
            guard.global_rule.clone()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Err(OutbreakError::unsupported(Capability::GlobalHistory.as_str())),
        }
    }
}
