//! Shared lifecycle contract for the relations the import manages.

use async_trait::async_trait;

use crate::error::ImportError;
use crate::source::ImportSource;

/// A relation the import can rebuild from source data and tear down again.
///
/// Setup is full-replace per relation: drop whatever exists, create the
/// relation afresh, load it, and index it. Teardown is idempotent so a
/// rollback can call it for relations whose setup never ran.
#[async_trait]
pub trait ReferenceEntity {
    /// Name of the relation this repository owns.
    fn relation(&self) -> &'static str;

    /// Rebuilds the relation from the source tree, returning the number of
    /// rows written.
    async fn setup_table(&self, source: &ImportSource) -> Result<u64, ImportError>;

    /// Drops the relation when present; succeeds when it is absent.
    async fn destroy_relation(&self) -> Result<(), ImportError>;
}
