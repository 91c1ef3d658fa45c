//! Aggregation input and output types.

use serde::{Deserialize, Serialize};

/// Record filter selected by the viewer.
///
/// `None` means "all" for that dimension; the two predicates are the
/// only filtering the engine applies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardFilter {
    /// Keep only records with this period label.
    pub period: Option<String>,
    /// Keep only records with this group label.
    pub group: Option<String>,
}

impl DashboardFilter {
    /// Creates a filter that matches every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a filter for a specific period.
    #[must_use]
    pub fn for_period(period: &str) -> Self {
        Self {
            period: Some(period.to_string()),
            group: None,
        }
    }

    /// Creates a filter for a specific group.
    #[must_use]
    pub fn for_group(group: &str) -> Self {
        Self {
            period: None,
            group: Some(group.to_string()),
        }
    }
}

/// Summary statistics over the filtered record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Sum of diamonds.
    pub total_diamonds: i64,
    /// Number of records.
    pub total_creators: u64,
    /// Sum of new followers.
    pub total_followers: i64,
    /// Records whose creator joined recently.
    pub new_creators: u64,
}

/// Aggregated totals for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRollup {
    /// Group label.
    pub name: String,
    /// Sum of diamonds over the group's filtered records.
    pub diamonds: i64,
    /// Number of filtered records in the group.
    pub creators: u64,
}

/// One row of the capped creator listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorRow {
    /// External creator identifier.
    pub creator_id: String,
    /// Display handle.
    pub creator_username: String,
    /// Group label.
    pub group_name: String,
    /// Sub-agent label.
    pub agent: String,
    /// Diamonds metric.
    pub diamonds: i64,
    /// Followers gained in the period.
    pub new_followers: i64,
    /// True if the creator joined recently.
    pub is_new: bool,
}

/// Everything the dashboard renders for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    /// Summary totals over the filtered set.
    pub summary: SummaryStats,
    /// Distinct period labels over the unfiltered set (filter options),
    /// first-seen order.
    pub periods: Vec<String>,
    /// Distinct non-empty group labels over the unfiltered set (filter
    /// options), first-seen order.
    pub groups: Vec<String>,
    /// Per-group rollups, diamonds descending, stable on ties.
    pub group_rollups: Vec<GroupRollup>,
    /// Filtered records truncated to the display cap, input order.
    pub creators: Vec<CreatorRow>,
}
