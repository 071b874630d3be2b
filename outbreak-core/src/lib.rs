//! outbreak-core
//!
//! Core types, traits, and utilities shared across the outbreak workspace.
//!
//! - `types`: domain entities (country catalog entries, snapshots, historical series,
//!   selections, metric and chart-mode keys).
//! - `connector`: the `OutbreakConnector` trait and capability provider traits.
//! - `timeseries`: derived metrics (active cases, daily deltas), weekly bucketing,
//!   cross-country date alignment, and chart-ready series preparation.
//! - `format`: display helpers for counts, percentages, and dates.
#![warn(missing_docs)]

/// Connector capability traits and the primary `OutbreakConnector` interface.
pub mod connector;
/// Display formatting helpers.
pub mod format;
/// Time-series derivations over historical series.
pub mod timeseries;
pub mod types;
/// Argument validation shared by connectors and the orchestrator.
pub mod validate;

pub use connector::OutbreakConnector;
pub use timeseries::align::{align_series, union_axis};
pub use timeseries::bucket::{Bucket, Reduction, WEEK, bucket_weekly, weekly_values};
pub use timeseries::chart::{
    ComparisonBar, ComparisonChart, SummaryStats, TrendChart, TrendDataset,
    build_comparison_chart, build_trend_chart, summarize,
};
pub use timeseries::derive::{daily_deltas, display_values, metric_values};
pub use types::*;
