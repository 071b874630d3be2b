//! Outbreak-specific error, configuration, and capability primitives.
#![warn(missing_docs)]

mod capability;
mod config;
mod connector;
mod error;

pub use capability::Capability;
pub use config::{DEFAULT_HISTORY_DAYS, MAX_SELECTION, OutbreakConfig};
pub use connector::ConnectorKey;
pub use error::{ErrorKind, OutbreakError, StatusCategory};
