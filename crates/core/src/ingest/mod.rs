//! Spreadsheet ingestion pipeline.
//!
//! Decodes an uploaded workbook, maps the localized header row onto the
//! canonical record schema, and coerces cell values with explicit
//! defaulting. The transformation is pure; persisting the output is the
//! caller's concern.

pub mod coerce;
pub mod error;
pub mod parser;
pub mod types;

pub use coerce::Coerced;
pub use error::IngestError;
pub use parser::{headers, parse_workbook, records_from_range};
pub use types::ParsedRecord;

#[cfg(test)]
mod tests;
