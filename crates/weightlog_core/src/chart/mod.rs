//! Period aggregation and chart view state.
//!
//! # Responsibility
//! - Derive display bounds for week/month/year periods.
//! - Turn fetched entries into chart-ready point/label series with a padded
//!   Y-axis range.
//! - Drive the period screen state machine (mode select, navigation,
//!   refresh, latest-wins load completion).
//!
//! # Invariants
//! - Aggregation is pure: identical inputs always yield identical output.
//! - Week output always has 7 label slots, year output always 12; month
//!   output has one slot per non-empty week bucket.
//! - A stale load completion (superseded generation) is never rendered.

pub mod aggregate;
pub mod period;
pub mod view;
