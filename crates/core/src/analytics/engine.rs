//! Aggregation computations.

use super::types::{CreatorRow, DashboardFilter, DashboardView, GroupRollup, SummaryStats};
use crate::record::CreatorRecord;

/// A creator counts as "new" up to and including this many days joined.
pub const NEW_CREATOR_MAX_DAYS: i64 = 30;

/// Maximum rows in the creator listing.
pub const CREATOR_VIEW_LIMIT: usize = 50;

/// Service computing dashboard views from record snapshots.
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// Computes the full dashboard view for a record snapshot and filter.
    ///
    /// `records` must already be sorted by diamonds descending; the
    /// engine preserves that order for the creator listing and only
    /// sorts the group rollups. The input is not mutated and equal
    /// diamond values keep their incoming relative order.
    #[must_use]
    pub fn aggregate(records: &[CreatorRecord], filter: &DashboardFilter) -> DashboardView {
        let filtered: Vec<&CreatorRecord> = records
            .iter()
            .filter(|r| Self::matches(r, filter))
            .collect();

        // Filter options come from the unfiltered snapshot so a narrow
        // selection never erases the other choices.
        let periods = distinct(records.iter().map(|r| r.period.as_str()));
        let groups = distinct(records.iter().map(|r| r.group_name.as_str()));

        let summary = Self::summarize(&filtered);
        let group_rollups = Self::rollup(&groups, &filtered);

        let creators = filtered
            .iter()
            .take(CREATOR_VIEW_LIMIT)
            .map(|r| CreatorRow {
                creator_id: r.creator_id.clone(),
                creator_username: r.creator_username.clone(),
                group_name: r.group_name.clone(),
                agent: r.agent.clone(),
                diamonds: r.diamonds,
                new_followers: r.new_followers,
                is_new: r.days_joined <= NEW_CREATOR_MAX_DAYS,
            })
            .collect();

        DashboardView {
            summary,
            periods,
            groups,
            group_rollups,
            creators,
        }
    }

    /// Returns true if a record passes the filter. Period and group
    /// equality are the only predicates.
    fn matches(record: &CreatorRecord, filter: &DashboardFilter) -> bool {
        if let Some(period) = &filter.period {
            if record.period != *period {
                return false;
            }
        }
        if let Some(group) = &filter.group {
            if record.group_name != *group {
                return false;
            }
        }
        true
    }

    fn summarize(filtered: &[&CreatorRecord]) -> SummaryStats {
        SummaryStats {
            total_diamonds: filtered.iter().map(|r| r.diamonds).sum(),
            total_creators: filtered.len() as u64,
            total_followers: filtered.iter().map(|r| r.new_followers).sum(),
            new_creators: filtered
                .iter()
                .filter(|r| r.days_joined <= NEW_CREATOR_MAX_DAYS)
                .count() as u64,
        }
    }

    /// Rolls the filtered set up per observed group, diamonds descending.
    ///
    /// The group list is derived from the unfiltered snapshot; a group
    /// whose records are all filtered out still appears, with zeros.
    fn rollup(groups: &[String], filtered: &[&CreatorRecord]) -> Vec<GroupRollup> {
        let mut rollups: Vec<GroupRollup> = groups
            .iter()
            .map(|name| {
                let members = filtered.iter().filter(|r| r.group_name == *name);
                let (mut diamonds, mut creators) = (0i64, 0u64);
                for r in members {
                    diamonds += r.diamonds;
                    creators += 1;
                }
                GroupRollup {
                    name: name.clone(),
                    diamonds,
                    creators,
                }
            })
            .collect();

        // Stable sort: ties keep first-seen group order.
        rollups.sort_by(|a, b| b.diamonds.cmp(&a.diamonds));
        rollups
    }
}

/// Collects distinct non-empty values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        if !value.is_empty() && !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
