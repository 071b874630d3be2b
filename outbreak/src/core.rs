use std::collections::{HashMap, HashSet};
#[cfg(feature = "tracing")]
use std::convert::TryFrom;
use std::sync::Arc;
use std::time::Duration;

use outbreak_core::connector::ConnectorKey;
use outbreak_core::{Capability, OutbreakConfig, OutbreakConnector, OutbreakError};

use crate::router::util::collapse_errors;

/// Orchestrator that routes requests across registered connectors.
pub struct Outbreak {
    pub(crate) connectors: Vec<Arc<dyn OutbreakConnector>>,
    pub(crate) priority: Vec<ConnectorKey>,
    pub(crate) cfg: OutbreakConfig,
}

/// Builder for constructing an `Outbreak` orchestrator with custom configuration.
pub struct OutbreakBuilder {
    connectors: Vec<Arc<dyn OutbreakConnector>>,
    priority: Vec<ConnectorKey>,
    cfg: OutbreakConfig,
}

impl Default for OutbreakBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OutbreakBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no connectors, 1500 days of history per country, and no
    /// per-request timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            priority: vec![],
            cfg: OutbreakConfig::default(),
        }
    }

    /// Register a connector.
    ///
    /// Registration order decides which connector is tried first unless
    /// [`prefer`](Self::prefer) says otherwise. Registering the same connector twice
    /// makes it answer twice on fallback.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn OutbreakConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set the preferred connector order.
    ///
    /// Connectors not listed keep their registration order after the listed ones.
    #[must_use]
    pub fn prefer(mut self, connectors_desc: &[Arc<dyn OutbreakConnector>]) -> Self {
        self.priority = connectors_desc
            .iter()
            .map(|c| ConnectorKey::new(c.name()))
            .collect();
        self
    }

    /// Number of trailing days requested for each per-country history.
    #[must_use]
    pub const fn history_days(mut self, days: u32) -> Self {
        self.cfg.history_days = days;
        self
    }

    /// Bound every individual provider call.
    ///
    /// A call that exceeds the timeout fails with `ProviderTimeout` and the next
    /// connector, if any, is tried.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: OutbreakConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Outbreak` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via
    /// [`with_connector`](Self::with_connector), or if `history_days` is zero.
    pub fn build(mut self) -> Result<Outbreak, OutbreakError> {
        // Drop preferred keys that name no registered connector, and repeats.
        let known: HashSet<&'static str> = self.connectors.iter().map(|c| c.name()).collect();
        let mut seen: HashSet<&'static str> = HashSet::new();
        self.priority
            .retain(|k| known.contains(k.as_str()) && seen.insert(k.as_str()));

        if self.connectors.is_empty() {
            return Err(OutbreakError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if self.cfg.history_days == 0 {
            return Err(OutbreakError::InvalidArg(
                "history_days must be at least 1".to_string(),
            ));
        }

        Ok(Outbreak {
            connectors: self.connectors,
            priority: self.priority,
            cfg: self.cfg,
        })
    }
}

/// Attach the connector name to errors that do not carry one.
pub fn tag_err(connector: &str, e: OutbreakError) -> OutbreakError {
    match e {
        OutbreakError::Other(msg) => OutbreakError::Other(format!("{connector}: {msg}")),
        other => other,
    }
}

impl Outbreak {
    /// Start building a new `Outbreak` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use outbreak_disease_sh::DiseaseShConnector;
    ///
    /// let outbreak = outbreak::Outbreak::builder()
    ///     .with_connector(Arc::new(DiseaseShConnector::new_default()))
    ///     .history_days(365)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> OutbreakBuilder {
        OutbreakBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &OutbreakConfig {
        &self.cfg
    }

    /// Wrap a provider future with the optional timeout and standardized timeout
    /// error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "outbreak::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = %capability,
                timeout_ms = timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: Option<Duration>,
        fut: Fut,
    ) -> Result<T, OutbreakError>
    where
        Fut: core::future::Future<Output = Result<T, OutbreakError>>,
    {
        match timeout {
            Some(t) => (tokio::time::timeout(t, fut).await).unwrap_or_else(|_| {
                Err(OutbreakError::provider_timeout(
                    connector_name,
                    capability.as_str(),
                ))
            }),
            None => fut.await,
        }
    }

    pub(crate) fn ordered(&self) -> Vec<Arc<dyn OutbreakConnector>> {
        let mut out: Vec<(usize, Arc<dyn OutbreakConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();
        if !self.priority.is_empty() {
            let pos: HashMap<_, _> = self
                .priority
                .iter()
                .enumerate()
                .map(|(i, n)| (n.as_str(), i))
                .collect();
            out.sort_by_key(|(orig_i, c)| {
                (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i)
            });
        }
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Try each capable connector in priority order until one succeeds.
    ///
    /// - `call` returns `None` for connectors that lack the capability; they are skipped.
    /// - `InvalidArg` stops the search: the input is wrong for every connector.
    /// - Otherwise failures are collected and collapsed with [`collapse_errors`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "outbreak::core::fetch_single",
            skip(self, call),
            fields(capability = %capability),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        capability: Capability,
        call: F,
    ) -> Result<T, OutbreakError>
    where
        T: Send,
        F: Fn(Arc<dyn OutbreakConnector>) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, OutbreakError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<OutbreakError> = Vec::new();

        for c in self.ordered() {
            if let Some(fut) = call(Arc::clone(&c)) {
                attempted_any = true;
                match Self::provider_call_with_timeout(
                    c.name(),
                    capability,
                    self.cfg.request_timeout,
                    fut,
                )
                .await
                {
                    Ok(v) => return Ok(v),
                    Err(e @ OutbreakError::InvalidArg(_)) => return Err(e),
                    Err(e) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(connector = c.name(), error = %e, "provider call failed");
                        errors.push(tag_err(c.name(), e));
                    }
                }
            }
        }

        Err(collapse_errors(capability, attempted_any, errors))
    }
}
