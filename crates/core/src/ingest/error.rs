//! Ingestion error types.

use thiserror::Error;

/// Errors that can occur during workbook ingestion.
///
/// Row-level bad data never fails ingestion; unusable cells are
/// defaulted instead. The only failure mode is a workbook that cannot
/// be decoded at all.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The uploaded bytes are not a decodable workbook.
    #[error("workbook could not be decoded: {0}")]
    MalformedWorkbook(String),
}
