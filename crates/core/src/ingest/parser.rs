//! Workbook decoding and row mapping.

use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use uuid::Uuid;

use super::coerce::{id_cell, int_cell, text_cell};
use super::error::IngestError;
use super::types::ParsedRecord;
use crate::record::CreatorRecord;

/// Localized header names recognized in upload workbooks.
pub mod headers {
    /// External creator identifier column.
    pub const CREATOR_ID: &str = "크리에이터 ID";
    /// Creator display handle column.
    pub const CREATOR_USERNAME: &str = "크리에이터 아이디";
    /// Grouping label column.
    pub const GROUP: &str = "그룹";
    /// Sub-agent label column.
    pub const AGENT: &str = "에이전트";
    /// Days-since-joined column.
    pub const DAYS_JOINED: &str = "가입 일수";
    /// Diamonds metric column.
    pub const DIAMONDS: &str = "다이아몬드";
    /// Previous month diamonds column.
    pub const LAST_MONTH_DIAMONDS: &str = "지난달 다이아몬드";
    /// New followers column.
    pub const NEW_FOLLOWERS: &str = "새 팔로워 수";
    /// Live hours column (free text in source).
    pub const LIVE_HOURS: &str = "라이브 진행 시간";
    /// Qualifying live days column.
    pub const LIVE_DAYS: &str = "유효 라이브 진행 일수";
}

/// Parses an uploaded workbook into normalized records.
///
/// The first sheet in file order is used; the first row is the header
/// row. `period` and `agency_id` are caller-supplied batch context
/// stamped onto every record, never derived from the file. Output
/// ordering matches input row order and duplicate rows are preserved.
///
/// # Errors
///
/// Returns [`IngestError::MalformedWorkbook`] if the bytes cannot be
/// decoded as a workbook or the workbook has no sheets. Bad cells never
/// fail the operation; they are defaulted per [`super::coerce`].
pub fn parse_workbook(
    bytes: &[u8],
    period: &str,
    agency_id: Uuid,
) -> Result<Vec<ParsedRecord>, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| IngestError::MalformedWorkbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::MalformedWorkbook("workbook has no sheets".to_string()))?
        .map_err(|e| IngestError::MalformedWorkbook(e.to_string()))?;

    Ok(records_from_range(&range, period, agency_id))
}

/// Maps a decoded cell range onto normalized records.
///
/// Exposed separately from [`parse_workbook`] so the mapping can be
/// exercised without workbook bytes.
#[must_use]
pub fn records_from_range(
    range: &Range<Data>,
    period: &str,
    agency_id: Uuid,
) -> Vec<ParsedRecord> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let columns = Columns::from_header(header_row);
    rows.map(|row| columns.record_from_row(row, period, agency_id))
        .collect()
}

/// Resolved column positions for the canonical fields.
#[derive(Debug, Default)]
struct Columns {
    creator_id: Option<usize>,
    creator_username: Option<usize>,
    group_name: Option<usize>,
    agent: Option<usize>,
    days_joined: Option<usize>,
    diamonds: Option<usize>,
    last_month_diamonds: Option<usize>,
    new_followers: Option<usize>,
    live_hours: Option<usize>,
    live_days: Option<usize>,
}

impl Columns {
    fn from_header(header_row: &[Data]) -> Self {
        let mut columns = Self::default();

        for (idx, cell) in header_row.iter().enumerate() {
            let Data::String(name) = cell else { continue };
            match name.trim() {
                headers::CREATOR_ID => columns.creator_id = Some(idx),
                headers::CREATOR_USERNAME => columns.creator_username = Some(idx),
                headers::GROUP => columns.group_name = Some(idx),
                headers::AGENT => columns.agent = Some(idx),
                headers::DAYS_JOINED => columns.days_joined = Some(idx),
                headers::DIAMONDS => columns.diamonds = Some(idx),
                headers::LAST_MONTH_DIAMONDS => columns.last_month_diamonds = Some(idx),
                headers::NEW_FOLLOWERS => columns.new_followers = Some(idx),
                headers::LIVE_HOURS => columns.live_hours = Some(idx),
                headers::LIVE_DAYS => columns.live_days = Some(idx),
                _ => {}
            }
        }

        columns
    }

    fn record_from_row(&self, row: &[Data], period: &str, agency_id: Uuid) -> ParsedRecord {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i));
        let mut defaulted_fields = Vec::new();

        let mut numeric = |name: &'static str, idx: Option<usize>| {
            let coerced = int_cell(cell(idx));
            if coerced.defaulted {
                defaulted_fields.push(name);
            }
            coerced.value
        };

        let days_joined = numeric("days_joined", self.days_joined);
        let diamonds = numeric("diamonds", self.diamonds);
        let last_month_diamonds = numeric("last_month_diamonds", self.last_month_diamonds);
        let new_followers = numeric("new_followers", self.new_followers);
        let live_days = numeric("live_days", self.live_days);

        let record = CreatorRecord {
            period: period.to_string(),
            agency_id,
            creator_id: id_cell(cell(self.creator_id)).value,
            creator_username: text_cell(cell(self.creator_username)).value,
            group_name: text_cell(cell(self.group_name)).value,
            agent: text_cell(cell(self.agent)).value,
            days_joined,
            diamonds,
            last_month_diamonds,
            new_followers,
            live_hours: text_cell(cell(self.live_hours)).value,
            live_days,
        };

        ParsedRecord {
            record,
            defaulted_fields,
        }
    }
}
