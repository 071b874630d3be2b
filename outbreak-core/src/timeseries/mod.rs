//! Time-series derivations over historical series.
//!
//! Modules include:
//! - `derive`: per-metric value extraction and daily deltas
//! - `bucket`: weekly aggregation with sum/last reductions
//! - `align`: cross-country alignment on a shared date axis
//! - `chart`: chart-ready trend and comparison data
/// Alignment of several series on the union of their dates.
pub mod align;
/// Weekly bucketing of per-day values.
pub mod bucket;
/// Chart preparation for trend lines and comparison bars.
pub mod chart;
/// Metric extraction and delta computation.
pub mod derive;
