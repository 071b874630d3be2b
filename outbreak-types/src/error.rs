use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Human-readable category for a non-success HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCategory {
    /// HTTP 404: the requested country or resource does not exist upstream.
    NotFound,
    /// HTTP 429: the provider throttled the request.
    RateLimited,
    /// HTTP 5xx.
    ServerError,
    /// Any other non-success status.
    Unknown,
}

impl StatusCategory {
    /// Classify an HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Short description used in user-facing messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::RateLimited => "rate limited",
            Self::ServerError => "server error",
            Self::Unknown => "unexpected status",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse error taxonomy used by callers that only need to branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input rejected before any network call.
    Validation,
    /// Network failure, timeout, or non-success HTTP status.
    Transport,
    /// The response body could not be decoded into the expected shape.
    Decode,
    /// Capability absence or an unexpected failure.
    Other,
}

/// Unified error type for the outbreak workspace.
///
/// Every provider and orchestrator operation returns this as the failure side of a
/// `Result`; nothing in the workspace reports errors by panicking.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutbreakError {
    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "history").
        capability: String,
    },

    /// Invalid input argument (empty country code, non-positive day count, ...).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The provider answered with a non-success HTTP status.
    #[error("{connector}: {category} (HTTP {status})")]
    Http {
        /// Connector name that issued the request.
        connector: String,
        /// Raw HTTP status code.
        status: u16,
        /// Classified status.
        category: StatusCategory,
    },

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("{connector}: request failed: {msg}")]
    Transport {
        /// Connector name that issued the request.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The response body was not valid JSON or lacked expected fields.
    #[error("{connector}: could not decode response: {msg}")]
    Decode {
        /// Connector name that issued the request.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "snapshot", "history").
        capability: String,
    },

    /// The caller cancelled the request before it completed.
    #[error("request cancelled")]
    Cancelled,

    /// All selected providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<OutbreakError>),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl OutbreakError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build an `Http` error, classifying the status.
    pub fn http(connector: impl Into<String>, status: u16) -> Self {
        Self::Http {
            connector: connector.into(),
            status,
            category: StatusCategory::from_status(status),
        }
    }

    /// Helper: build a `Transport` error with the connector name and message.
    pub fn transport(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transport {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Decode` error with the connector name and message.
    pub fn decode(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Decode {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Classify this error into the coarse taxonomy.
    ///
    /// Aggregates take the kind of their first inner error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArg(_) => ErrorKind::Validation,
            Self::Http { .. } | Self::Transport { .. } | Self::ProviderTimeout { .. } => {
                ErrorKind::Transport
            }
            Self::Decode { .. } => ErrorKind::Decode,
            Self::AllProvidersFailed(inner) => {
                inner.first().map_or(ErrorKind::Other, Self::kind)
            }
            Self::Unsupported { .. } | Self::Cancelled | Self::Other(_) => ErrorKind::Other,
        }
    }

    /// The HTTP status category, when this error came from a non-success response.
    #[must_use]
    pub const fn status_category(&self) -> Option<StatusCategory> {
        match self {
            Self::Http { category, .. } => Some(*category),
            _ => None,
        }
    }

    /// Returns true if the upstream reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Http { category, .. } => *category == StatusCategory::NotFound,
            Self::AllProvidersFailed(inner) => {
                !inner.is_empty() && inner.iter().all(Self::is_not_found)
            }
            _ => false,
        }
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
