//! Property-based and scenario tests for the aggregation engine.

use proptest::prelude::*;
use uuid::Uuid;

use super::engine::{AnalyticsEngine, CREATOR_VIEW_LIMIT};
use super::types::DashboardFilter;
use crate::record::CreatorRecord;

fn record(period: &str, group: &str, diamonds: i64, followers: i64, days: i64) -> CreatorRecord {
    CreatorRecord {
        days_joined: days,
        diamonds,
        new_followers: followers,
        group_name: group.to_string(),
        ..CreatorRecord::empty(period, Uuid::nil())
    }
}

/// Sorts diamonds descending, mirroring the store query's contract.
fn sorted(mut records: Vec<CreatorRecord>) -> Vec<CreatorRecord> {
    records.sort_by(|a, b| b.diamonds.cmp(&a.diamonds));
    records
}

fn arb_records() -> impl Strategy<Value = Vec<CreatorRecord>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["11월", "12월1주", "12월2주"]),
            prop::sample::select(vec!["A", "B", "C"]),
            0i64..10_000_000,
            0i64..100_000,
            0i64..365,
        ),
        0..120,
    )
    .prop_map(|rows| {
        sorted(
            rows.into_iter()
                .map(|(p, g, d, f, j)| record(p, g, d, f, j))
                .collect(),
        )
    })
}

proptest! {
    /// The all/all filter's summary equals totals over the whole input.
    #[test]
    fn test_unfiltered_summary_matches_input_totals(records in arb_records()) {
        let view = AnalyticsEngine::aggregate(&records, &DashboardFilter::all());

        prop_assert_eq!(view.summary.total_diamonds, records.iter().map(|r| r.diamonds).sum::<i64>());
        prop_assert_eq!(view.summary.total_creators, records.len() as u64);
        prop_assert_eq!(view.summary.total_followers, records.iter().map(|r| r.new_followers).sum::<i64>());
    }

    /// Each rollup equals the filtered sum for its group, and with no
    /// group filter and no ungrouped records the rollups sum to the
    /// summary total.
    #[test]
    fn test_rollup_sum_property(records in arb_records()) {
        let view = AnalyticsEngine::aggregate(&records, &DashboardFilter::all());

        for rollup in &view.group_rollups {
            let expected: i64 = records
                .iter()
                .filter(|r| r.group_name == rollup.name)
                .map(|r| r.diamonds)
                .sum();
            prop_assert_eq!(rollup.diamonds, expected);
        }

        let rollup_total: i64 = view.group_rollups.iter().map(|r| r.diamonds).sum();
        prop_assert_eq!(rollup_total, view.summary.total_diamonds);
    }

    /// Rollups are ordered by diamonds descending.
    #[test]
    fn test_rollups_sorted_descending(records in arb_records()) {
        let view = AnalyticsEngine::aggregate(&records, &DashboardFilter::all());
        for pair in view.group_rollups.windows(2) {
            prop_assert!(pair[0].diamonds >= pair[1].diamonds);
        }
    }

    /// The creator view never exceeds the cap, and below the cap it
    /// contains the whole filtered set.
    #[test]
    fn test_creator_view_cap(records in arb_records()) {
        let view = AnalyticsEngine::aggregate(&records, &DashboardFilter::all());
        prop_assert_eq!(view.creators.len(), records.len().min(CREATOR_VIEW_LIMIT));
    }

    /// Filtering by a period then summing groups agrees with a direct
    /// filtered summary.
    #[test]
    fn test_period_filter_scopes_summary(records in arb_records()) {
        let filter = DashboardFilter::for_period("11월");
        let view = AnalyticsEngine::aggregate(&records, &filter);

        let expected: i64 = records
            .iter()
            .filter(|r| r.period == "11월")
            .map(|r| r.diamonds)
            .sum();
        prop_assert_eq!(view.summary.total_diamonds, expected);
    }
}

#[test]
fn test_new_creator_threshold_boundary() {
    let records = sorted(vec![
        record("p", "A", 100, 0, 30),
        record("p", "A", 50, 0, 31),
    ]);
    let view = AnalyticsEngine::aggregate(&records, &DashboardFilter::all());

    assert_eq!(view.summary.new_creators, 1);
    assert!(view.creators[0].is_new);
    assert!(!view.creators[1].is_new);
}

#[test]
fn test_filter_options_come_from_unfiltered_set() {
    let records = sorted(vec![
        record("11월", "A", 300, 0, 5),
        record("12월", "B", 200, 0, 5),
        record("12월", "C", 100, 0, 5),
    ]);
    let view = AnalyticsEngine::aggregate(&records, &DashboardFilter::for_group("A"));

    // A narrow selection keeps every choice visible.
    assert_eq!(view.periods, ["11월", "12월"]);
    assert_eq!(view.groups, ["A", "B", "C"]);

    // But the rollup values reflect the filtered set.
    let a = view.group_rollups.iter().find(|r| r.name == "A").unwrap();
    let b = view.group_rollups.iter().find(|r| r.name == "B").unwrap();
    assert_eq!(a.diamonds, 300);
    assert_eq!(b.diamonds, 0);
}

#[test]
fn test_ungrouped_records_count_in_summary_but_not_rollups() {
    let records = sorted(vec![
        record("p", "A", 500, 10, 5),
        record("p", "", 300, 20, 5),
    ]);
    let view = AnalyticsEngine::aggregate(&records, &DashboardFilter::all());

    assert_eq!(view.summary.total_diamonds, 800);
    assert_eq!(view.groups, ["A"]);
    assert_eq!(view.group_rollups.len(), 1);
    assert_eq!(view.group_rollups[0].diamonds, 500);
}

#[test]
fn test_creator_view_preserves_input_order_on_ties() {
    let records = vec![
        record("p", "A", 100, 0, 5),
        record("p", "B", 100, 0, 5),
        record("p", "C", 100, 0, 5),
    ];
    let view = AnalyticsEngine::aggregate(&records, &DashboardFilter::all());

    let groups: Vec<_> = view.creators.iter().map(|c| c.group_name.as_str()).collect();
    assert_eq!(groups, ["A", "B", "C"]);
}

#[test]
fn test_combined_period_and_group_filter() {
    let records = sorted(vec![
        record("11월", "A", 500, 0, 5),
        record("11월", "B", 400, 0, 5),
        record("12월", "A", 300, 0, 5),
    ]);
    let filter = DashboardFilter {
        period: Some("11월".to_string()),
        group: Some("A".to_string()),
    };
    let view = AnalyticsEngine::aggregate(&records, &filter);

    assert_eq!(view.summary.total_creators, 1);
    assert_eq!(view.summary.total_diamonds, 500);
}

#[test]
fn test_empty_input() {
    let view = AnalyticsEngine::aggregate(&[], &DashboardFilter::all());
    assert_eq!(view.summary, super::types::SummaryStats::default());
    assert!(view.periods.is_empty());
    assert!(view.groups.is_empty());
    assert!(view.group_rollups.is_empty());
    assert!(view.creators.is_empty());
}
