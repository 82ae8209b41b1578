//! Source-file layouts and parsing for the import.
//!
//! The run reads three kinds of source data: the ONS Postcode Directory CSV,
//! the bundled attribute documents (JSON code-to-name maps), and the place
//! gazetteer files. Parsers here are strict; layout violations surface as
//! [`SourceError::MalformedRow`](crate::error::source::SourceError) and fail
//! the run, they are never skipped.

pub mod attribute;
pub mod onspd;
pub mod places;

use std::path::PathBuf;

use csv::StringRecord;

use crate::error::source::SourceError;

/// Locations of the source data one import run reads.
#[derive(Debug, Clone)]
pub struct ImportSource {
    /// The ONS Postcode Directory CSV.
    pub postcodes: PathBuf,
    /// Directory holding the attribute documents.
    pub data_dir: PathBuf,
    /// Directory holding the place gazetteer files.
    pub places_dir: PathBuf,
}

pub(crate) fn required_field(
    line: u64,
    record: &StringRecord,
    index: usize,
    name: &str,
) -> Result<String, SourceError> {
    let raw = record[index].trim();
    if raw.is_empty() {
        return Err(SourceError::MalformedRow {
            line,
            reason: format!("empty {name}"),
        });
    }
    Ok(raw.to_string())
}

pub(crate) fn optional_field(record: &StringRecord, index: usize) -> Option<String> {
    let raw = record[index].trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

pub(crate) fn numeric_field(
    line: u64,
    record: &StringRecord,
    index: usize,
    name: &str,
) -> Result<i32, SourceError> {
    let raw = record[index].trim();
    raw.parse::<i32>().map_err(|_| SourceError::MalformedRow {
        line,
        reason: format!("non-numeric {name}: {raw:?}"),
    })
}
