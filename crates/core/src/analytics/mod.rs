//! Dashboard aggregation engine.
//!
//! Pure computation from a snapshot of creator records plus a filter to
//! the statistics the dashboard renders: summary totals, per-group
//! rollups, and a capped creator listing. The record snapshot arrives
//! already sorted by diamonds descending (the store query's ordering
//! contract); the engine never re-sorts the listing.

pub mod engine;
pub mod format;
pub mod types;

pub use engine::{AnalyticsEngine, CREATOR_VIEW_LIMIT, NEW_CREATOR_MAX_DAYS};
pub use format::format_metric;
pub use types::{CreatorRow, DashboardFilter, DashboardView, GroupRollup, SummaryStats};

#[cfg(test)]
mod tests;
