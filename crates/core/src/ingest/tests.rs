//! Tests for the ingestion pipeline.

use calamine::{Data, Range};
use uuid::Uuid;

use super::parser::{headers, parse_workbook, records_from_range};

const ALL_HEADERS: [&str; 10] = [
    headers::CREATOR_ID,
    headers::CREATOR_USERNAME,
    headers::GROUP,
    headers::AGENT,
    headers::DAYS_JOINED,
    headers::DIAMONDS,
    headers::LAST_MONTH_DIAMONDS,
    headers::NEW_FOLLOWERS,
    headers::LIVE_HOURS,
    headers::LIVE_DAYS,
];

/// Builds a sheet range with the full header row and the given data rows.
fn sheet(rows: &[Vec<Data>]) -> Range<Data> {
    #[allow(clippy::cast_possible_truncation)]
    let mut range = Range::new((0, 0), (rows.len() as u32, 9));

    for (col, name) in ALL_HEADERS.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        range.set_value((0, col as u32), Data::String((*name).to_string()));
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            range.set_value((row_idx as u32 + 1, col_idx as u32), cell.clone());
        }
    }

    range
}

fn full_row(username: &str, group: &str, diamonds: Data) -> Vec<Data> {
    vec![
        Data::Int(1001),
        Data::String(username.to_string()),
        Data::String(group.to_string()),
        Data::String("agent-a".to_string()),
        Data::Int(12),
        diamonds,
        Data::Int(900_000),
        Data::Int(150),
        Data::String("10:30".to_string()),
        Data::Int(20),
    ]
}

#[test]
fn test_every_row_becomes_one_record_in_order() {
    let range = sheet(&[
        full_row("alpha", "A", Data::Int(500)),
        full_row("bravo", "B", Data::Int(400)),
        full_row("charlie", "A", Data::Int(300)),
    ]);

    let agency = Uuid::new_v4();
    let parsed = records_from_range(&range, "12월1주", agency);

    assert_eq!(parsed.len(), 3);
    let usernames: Vec<_> = parsed
        .iter()
        .map(|p| p.record.creator_username.as_str())
        .collect();
    assert_eq!(usernames, ["alpha", "bravo", "charlie"]);

    for p in &parsed {
        assert_eq!(p.record.period, "12월1주");
        assert_eq!(p.record.agency_id, agency);
        assert!(p.defaulted_fields.is_empty());
    }
}

#[test]
fn test_canonical_field_mapping() {
    let range = sheet(&[full_row("alpha", "A팀", Data::Int(1_234_567))]);
    let parsed = records_from_range(&range, "11월", Uuid::new_v4());

    let record = &parsed[0].record;
    assert_eq!(record.creator_id, "1001");
    assert_eq!(record.creator_username, "alpha");
    assert_eq!(record.group_name, "A팀");
    assert_eq!(record.agent, "agent-a");
    assert_eq!(record.days_joined, 12);
    assert_eq!(record.diamonds, 1_234_567);
    assert_eq!(record.last_month_diamonds, 900_000);
    assert_eq!(record.new_followers, 150);
    assert_eq!(record.live_hours, "10:30");
    assert_eq!(record.live_days, 20);
}

#[test]
fn test_bad_numeric_cells_default_to_zero_and_are_flagged() {
    let rows = vec![
        full_row("a", "A", Data::String("1500000".to_string())),
        full_row("b", "A", Data::String("abc".to_string())),
        full_row("c", "A", Data::Int(200_000_000)),
    ];
    let parsed = records_from_range(&sheet(&rows), "p", Uuid::new_v4());

    let diamonds: Vec<_> = parsed.iter().map(|p| p.record.diamonds).collect();
    assert_eq!(diamonds, [1_500_000, 0, 200_000_000]);

    assert!(!parsed[0].was_defaulted("diamonds"));
    assert!(parsed[1].was_defaulted("diamonds"));
    assert!(!parsed[2].was_defaulted("diamonds"));
}

#[test]
fn test_missing_columns_default_without_failing_the_row() {
    // Header carries only two of the ten recognized columns.
    let mut range = Range::new((0, 0), (1, 1));
    range.set_value((0, 0), Data::String(headers::CREATOR_USERNAME.to_string()));
    range.set_value((0, 1), Data::String(headers::DIAMONDS.to_string()));
    range.set_value((1, 0), Data::String("solo".to_string()));
    range.set_value((1, 1), Data::Int(42));

    let parsed = records_from_range(&range, "p", Uuid::new_v4());
    assert_eq!(parsed.len(), 1);

    let p = &parsed[0];
    assert_eq!(p.record.creator_username, "solo");
    assert_eq!(p.record.diamonds, 42);
    assert_eq!(p.record.creator_id, "");
    assert_eq!(p.record.group_name, "");
    assert_eq!(p.record.days_joined, 0);
    assert!(p.was_defaulted("days_joined"));
    assert!(p.was_defaulted("new_followers"));
    assert!(!p.was_defaulted("diamonds"));
}

#[test]
fn test_unknown_columns_are_ignored() {
    let mut range = Range::new((0, 0), (1, 2));
    range.set_value((0, 0), Data::String("순위".to_string()));
    range.set_value((0, 1), Data::String(headers::DIAMONDS.to_string()));
    range.set_value((0, 2), Data::String(headers::CREATOR_USERNAME.to_string()));
    range.set_value((1, 0), Data::Int(1));
    range.set_value((1, 1), Data::Int(777));
    range.set_value((1, 2), Data::String("ranked".to_string()));

    let parsed = records_from_range(&range, "p", Uuid::new_v4());
    assert_eq!(parsed[0].record.diamonds, 777);
    assert_eq!(parsed[0].record.creator_username, "ranked");
}

#[test]
fn test_header_only_sheet_yields_no_records() {
    let range = sheet(&[]);
    let parsed = records_from_range(&range, "p", Uuid::new_v4());
    assert!(parsed.is_empty());
}

#[test]
fn test_undecodable_bytes_fail_the_whole_operation() {
    let result = parse_workbook(b"definitely not a workbook", "p", Uuid::new_v4());
    assert!(result.is_err());
}
