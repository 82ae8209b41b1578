//! Source-data error types.
//!
//! Errors raised while locating or reading the ONS Postcode Directory CSV,
//! the bundled attribute documents, and the place files. Ingestion is strict:
//! a single malformed row anywhere in a source file fails the whole run
//! rather than silently dropping the row.

use std::path::PathBuf;

use thiserror::Error;

/// Source-data error type.
#[derive(Error, Debug)]
pub enum SourceError {
    /// A named source file or directory does not exist.
    #[error("Source not found: {}", .0.display())]
    Missing(PathBuf),

    /// A row violated the expected layout.
    ///
    /// Raised for short rows (fewer columns than the directory layout
    /// guarantees) and for grid fields that do not parse as numbers. The
    /// line number is 1-based and counts records, not file lines.
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// An attribute data document could not be parsed.
    #[error("Unreadable attribute data {}: {source}", .path.display())]
    Data {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Underlying CSV reader failure (I/O or quoting errors mid-stream).
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
