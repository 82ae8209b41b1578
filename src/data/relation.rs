//! Relation lifecycle primitives shared by the repositories.
//!
//! Creation is introspection-first: finding an existing relation of the
//! same name is a [`StoreError::RelationConflict`], never a silent
//! overwrite. Drops go through `IF EXISTS` so teardown and rollback stay
//! idempotent.

use sea_orm::{
    sea_query::{Alias, Index, Table},
    ConnectionTrait, DbBackend, DbErr, EntityTrait, Schema, Statement,
};

use crate::error::{store::StoreError, ImportError};

/// Canonical names of the relations the import owns.
pub mod relation_name {
    pub const POSTCODES: &str = "postcodes";
    pub const OUTCODES: &str = "outcodes";
    pub const TERMINATED_POSTCODES: &str = "terminated_postcodes";
    pub const PLACES: &str = "places";
    pub const DISTRICTS: &str = "districts";
    pub const COUNTIES: &str = "counties";
    pub const CCGS: &str = "ccgs";
    pub const WARDS: &str = "wards";
    pub const NUTS: &str = "nuts";
    pub const PARISHES: &str = "parishes";
    pub const CONSTITUENCIES: &str = "constituencies";
}

/// Reports whether `relation` exists on the connected database.
pub async fn relation_exists<C: ConnectionTrait>(db: &C, relation: &str) -> Result<bool, DbErr> {
    let backend = db.get_database_backend();
    let stmt = match backend {
        DbBackend::Postgres => Statement::from_sql_and_values(
            backend,
            "SELECT to_regclass($1) IS NOT NULL AS present",
            [relation.into()],
        ),
        DbBackend::Sqlite => Statement::from_sql_and_values(
            backend,
            "SELECT COUNT(*) > 0 AS present FROM sqlite_master WHERE type = 'table' AND name = ?",
            [relation.into()],
        ),
        _ => return Err(DbErr::Custom("unsupported database backend".to_string())),
    };

    let row = db
        .query_one_raw(stmt)
        .await?
        .ok_or_else(|| DbErr::Custom(format!("no presence row returned for {relation}")))?;

    row.try_get("", "present")
}

/// Creates `entity`'s relation from its schema definition.
///
/// Introspects first and fails with [`StoreError::RelationConflict`] when a
/// relation of the same name already exists.
pub async fn create_relation<C, E>(db: &C, entity: E) -> Result<(), ImportError>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let relation = entity.table_name().to_string();
    if relation_exists(db, &relation).await? {
        return Err(StoreError::RelationConflict { relation }.into());
    }

    let schema = Schema::new(db.get_database_backend());
    db.execute(&schema.create_table_from_entity(entity)).await?;

    Ok(())
}

/// Drops `entity`'s relation when present.
pub async fn drop_relation<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut stmt = Table::drop();
    stmt.table(entity).if_exists();
    db.execute(&stmt).await?;

    Ok(())
}

/// Drops a relation by name when present.
///
/// Rollback works from recorded relation names rather than live entities,
/// so it can target relations whose setup never completed.
pub async fn drop_relation_by_name<C: ConnectionTrait>(db: &C, relation: &str) -> Result<(), DbErr> {
    let mut stmt = Table::drop();
    stmt.table(Alias::new(relation)).if_exists();
    db.execute(&stmt).await?;

    Ok(())
}

/// Creates an index named `name` over `columns`.
pub async fn create_index<C, E>(
    db: &C,
    entity: E,
    name: &str,
    columns: &[E::Column],
    unique: bool,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut stmt = Index::create();
    stmt.name(name).table(entity);
    for column in columns {
        stmt.col(*column);
    }
    if unique {
        stmt.unique();
    }

    db.execute(&stmt).await?;

    Ok(())
}

/// Drops an index by name when present.
///
/// Raw because index drops are name-only on Postgres but table-scoped in
/// the portable builder.
pub async fn drop_index<C: ConnectionTrait>(db: &C, name: &str) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    db.execute_raw(Statement::from_string(
        backend,
        format!("DROP INDEX IF EXISTS {name}"),
    ))
    .await?;

    Ok(())
}

/// Ensures the spatial extension is available.
///
/// Postgres installs PostGIS; SQLite has no extension mechanism and the
/// geodetic conversion runs in the importer itself, so the call is a no-op
/// there.
pub async fn enable_spatial_extension<C: ConnectionTrait>(db: &C) -> Result<(), ImportError> {
    match db.get_database_backend() {
        DbBackend::Postgres => {
            db.execute_raw(Statement::from_string(
                DbBackend::Postgres,
                "CREATE EXTENSION IF NOT EXISTS postgis",
            ))
            .await
            .map_err(StoreError::ExtensionUnavailable)?;
        }
        _ => {
            tracing::debug!("no spatial extension to enable for this backend");
        }
    }

    Ok(())
}
