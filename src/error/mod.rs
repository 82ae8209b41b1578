//! Error types for the cairn importer.
//!
//! This module provides specialized error types for the import domains
//! (configuration, source files, relation/store management) aggregated into a
//! single top-level error. All errors use `thiserror` for ergonomic error
//! definitions with automatic `Display` and `Error` trait implementations.

pub mod config;
pub mod source;
pub mod store;

use thiserror::Error;

use crate::error::{config::ConfigError, source::SourceError, store::StoreError};

/// Main error type for the importer.
///
/// This enum aggregates all domain-specific error types and external library
/// errors into a single unified error type. It uses `thiserror`'s `#[from]`
/// attribute to enable automatic conversion from underlying error types via
/// the `?` operator.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Source errors (missing files, malformed rows, unreadable documents)
/// - Store errors (relation conflicts, spatial extension failures)
/// - External library errors (database, filesystem)
#[derive(Error, Debug)]
pub enum ImportError {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Source-file error (absent path, malformed row, bad attribute data).
    #[error(transparent)]
    SourceError(#[from] SourceError),
    /// Store error (relation conflict, spatial extension unavailable).
    #[error(transparent)]
    StoreError(#[from] StoreError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Filesystem error reading a source location.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
