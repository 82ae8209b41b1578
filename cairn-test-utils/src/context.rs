//! Test context structure and utilities.
//!
//! The `TestContext` wraps an in-memory SQLite database. Every repository in
//! the importer is generic over [`sea_orm::ConnectionTrait`], so the whole
//! pipeline runs against this connection in tests; statements that only
//! exist on Postgres (the spatial extension, the GIST index) take their
//! SQLite branch instead.

use sea_orm::{
    sea_query::TableCreateStatement, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
};

use crate::error::TestError;

/// Test context returned by [`TestBuilder`](crate::TestBuilder).
pub struct TestContext {
    /// Connection to the in-memory SQLite database.
    pub db: DatabaseConnection,
}

impl TestContext {
    pub async fn new() -> Result<Self, TestError> {
        // A single pooled connection; every pool member of an in-memory
        // SQLite database would otherwise see its own empty database.
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);

        let db = Database::connect(options).await?;

        Ok(TestContext { db })
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }
}

#[macro_export]
macro_rules! test_context_with_tables {
    // Pattern 1: No entities provided
    () => {{
        $crate::TestContext::new().await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let context = $crate::TestContext::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            context.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(context)
        }.await
    }};
}
