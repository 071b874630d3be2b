//! Outbreak loads COVID-19 statistics for a set of countries and prepares them for
//! display.
//!
//! Overview
//! - [`Outbreak`] routes snapshot, history and catalog requests to connectors that
//!   implement the `outbreak_core` contracts, trying them in priority order.
//! - [`Dashboard`] turns a [`Selection`] into published [`DashboardState`]: one batch
//!   of concurrent calls per selection change, with superseded batches discarded.
//! - Chart preparation (weekly trend lines, comparison bars) is computed on demand
//!   from the published state.
//!
//! Key behaviors
//! - Partial failure: every success is kept; only the first error is surfaced in
//!   `DashboardState::error_message`. [`Outbreak::load_selection`] keeps the full list.
//! - No timeout by default. [`OutbreakBuilder::request_timeout`] bounds each provider
//!   call; a hung call otherwise delays its batch until superseded.
//! - No caching and no retries beyond [`Dashboard::retry`].
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use outbreak::{Dashboard, Outbreak, Selection, CountryListItem, ChartMode};
//! use outbreak_disease_sh::DiseaseShConnector;
//!
//! let outbreak = Outbreak::builder()
//!     .with_connector(Arc::new(DiseaseShConnector::new_default()))
//!     .build()?;
//! let dashboard = Dashboard::new(Arc::new(outbreak));
//!
//! let selection = Selection::try_from_items([
//!     CountryListItem::new("France", "FR"),
//!     CountryListItem::new("Germany", "DE"),
//! ])?;
//! dashboard.select(selection).await;
//! let state = dashboard.settled().await;
//! let weekly = dashboard.trend_chart(ChartMode::Daily);
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod pipeline;
mod router;

pub use core::{Outbreak, OutbreakBuilder};
pub use pipeline::{Dashboard, DashboardState, Phase};
pub use router::batch::{BatchFailure, BatchOutcome};
pub use router::util::collapse_errors;

pub use outbreak_types::{
    Capability, DEFAULT_HISTORY_DAYS, ErrorKind, MAX_SELECTION, OutbreakConfig, OutbreakError,
    StatusCategory,
};

// Re-export core types for convenience
pub use outbreak_core::{
    ChartMode, ComparisonBar, ComparisonChart, CountryListItem, CountrySnapshot,
    HistoricalPoint, HistoricalSeries, MetricKey, OutbreakConnector, Selection, SummaryStats,
    TrendChart, TrendDataset,
};
