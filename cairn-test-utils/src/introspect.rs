//! SQLite schema introspection for test assertions.

use sea_orm::{ConnectionTrait, DbBackend, Statement};

use crate::error::TestError;

/// Reports whether an index named `name` exists in the test database.
pub async fn index_exists<C: ConnectionTrait>(db: &C, name: &str) -> Result<bool, TestError> {
    let row = db
        .query_one_raw(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "SELECT COUNT(*) > 0 AS present FROM sqlite_master WHERE type = 'index' AND name = ?",
            [name.into()],
        ))
        .await?;

    Ok(match row {
        Some(row) => row.try_get("", "present")?,
        None => false,
    })
}
