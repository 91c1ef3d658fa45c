//! The canonical creator performance record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One creator's performance metrics for one reporting period.
///
/// Every record belongs to exactly one `(period, agency_id)` batch; the
/// batch is the atomic unit of deletion. Records are never updated in
/// place after ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorRecord {
    /// Operator-entered label for the reporting interval (not validated
    /// against any calendar).
    pub period: String,
    /// Agency that owns this record.
    pub agency_id: Uuid,
    /// External creator identifier; may be empty when absent in source.
    pub creator_id: String,
    /// Display handle.
    pub creator_username: String,
    /// Free-text grouping label; empty allowed.
    pub group_name: String,
    /// Free-text sub-agent label.
    pub agent: String,
    /// Days since the creator joined.
    pub days_joined: i64,
    /// Primary ranking metric.
    pub diamonds: i64,
    /// Previous month's diamonds.
    pub last_month_diamonds: i64,
    /// Followers gained in the period.
    pub new_followers: i64,
    /// Live broadcast hours; source format is inconsistent, kept opaque.
    pub live_hours: String,
    /// Days with a qualifying live broadcast.
    pub live_days: i64,
}

impl CreatorRecord {
    /// Creates an empty record for the given batch context.
    #[must_use]
    pub fn empty(period: &str, agency_id: Uuid) -> Self {
        Self {
            period: period.to_string(),
            agency_id,
            creator_id: String::new(),
            creator_username: String::new(),
            group_name: String::new(),
            agent: String::new(),
            days_joined: 0,
            diamonds: 0,
            last_month_diamonds: 0,
            new_followers: 0,
            live_hours: String::new(),
            live_days: 0,
        }
    }
}
