//! Store and relation lifecycle error types.

use thiserror::Error;

/// Relation and extension management error type.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Relation creation found an existing relation of the same name.
    ///
    /// The import never overwrites silently; the teardown stage must have
    /// removed the relation first.
    #[error("Relation {relation} already exists; teardown must run before setup")]
    RelationConflict { relation: String },

    /// The spatial extension could not be enabled on the target database.
    #[error("Spatial extension unavailable: {0}")]
    ExtensionUnavailable(#[source] sea_orm::DbErr),
}

/// A failure encountered while tearing relations down after a stage error.
///
/// Collected during rollback and reported alongside the original stage
/// error, never in place of it.
#[derive(Error, Debug)]
#[error("Rollback failed for relation {relation}: {source}")]
pub struct RollbackError {
    pub relation: &'static str,
    #[source]
    pub source: sea_orm::DbErr,
}
