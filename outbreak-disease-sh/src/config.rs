use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://disease.sh/v3/covid-19";

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("outbreak-disease-sh/", env!("CARGO_PKG_VERSION"));

/// HTTP client settings for [`crate::DiseaseShConnector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiseaseShConfig {
    /// API root; endpoint paths are appended as segments.
    pub base_url: String,
    /// Whole-request timeout applied by the HTTP client. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for DiseaseShConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl DiseaseShConfig {
    /// Point the client at another API root (a mirror or a local test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Bound every HTTP request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
