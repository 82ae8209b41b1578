//! Declarative test builder.
//!
//! Provides the `TestBuilder` API for configuring test databases before
//! execution. Configuration calls chain and everything queued executes during
//! the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Queues entity tables and row fixtures, then creates the in-memory
/// database and applies everything in `build()`.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_import_tables: bool,
    postcodes: Vec<entity::postcode::ActiveModel>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_import_tables: false,
            postcodes: Vec::new(),
        }
    }

    /// Add every relation the import pipeline owns.
    ///
    /// Covers the primary postcode relation, the aggregates, and all support
    /// entities, so a full pipeline run can execute against the context.
    pub fn with_import_tables(mut self) -> Self {
        self.include_import_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cairn_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), cairn_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Postcode)
    ///     .with_table(Outcode)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Queue postcode rows for insertion after the tables are created.
    pub fn with_postcodes(mut self, models: Vec<entity::postcode::ActiveModel>) -> Self {
        self.postcodes.extend(models);
        self
    }

    /// Create the database, tables, and queued fixtures.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new().await?;

        let mut stmts = Vec::new();
        if self.include_import_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            stmts.extend([
                schema.create_table_from_entity(entity::prelude::Postcode),
                schema.create_table_from_entity(entity::prelude::Outcode),
                schema.create_table_from_entity(entity::prelude::TerminatedPostcode),
                schema.create_table_from_entity(entity::prelude::Place),
                schema.create_table_from_entity(entity::prelude::District),
                schema.create_table_from_entity(entity::prelude::County),
                schema.create_table_from_entity(entity::prelude::Ccg),
                schema.create_table_from_entity(entity::prelude::Ward),
                schema.create_table_from_entity(entity::prelude::Nuts),
                schema.create_table_from_entity(entity::prelude::Parish),
                schema.create_table_from_entity(entity::prelude::Constituency),
            ]);
        }
        stmts.extend(self.tables);
        context.with_tables(stmts).await?;

        if !self.postcodes.is_empty() {
            entity::prelude::Postcode::insert_many(self.postcodes)
                .exec(&context.db)
                .await?;
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
