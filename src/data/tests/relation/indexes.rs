//! Tests for relation::create_index and relation::drop_index.

use super::*;

/// Tests creating a named index over an entity column.
///
/// Expected: Ok, and the index is introspectable afterwards
#[tokio::test]
async fn creates_named_index() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    relation::create_relation(&test.db, entity::prelude::District)
        .await
        .expect("create districts relation");

    let result = relation::create_index(
        &test.db,
        entity::prelude::District,
        "idx_districts_code",
        &[entity::district::Column::Code],
        true,
    )
    .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert!(introspect::index_exists(&test.db, "idx_districts_code").await?);

    Ok(())
}

/// Tests dropping an index, present and absent.
///
/// Expected: Ok both times, and the index is gone
#[tokio::test]
async fn drops_index_idempotently() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    relation::create_relation(&test.db, entity::prelude::District)
        .await
        .expect("create districts relation");
    relation::create_index(
        &test.db,
        entity::prelude::District,
        "idx_districts_code",
        &[entity::district::Column::Code],
        false,
    )
    .await
    .expect("create index");

    let present = relation::drop_index(&test.db, "idx_districts_code").await;
    let absent = relation::drop_index(&test.db, "idx_districts_code").await;

    assert!(present.is_ok(), "Error: {:?}", present);
    assert!(absent.is_ok(), "Error: {:?}", absent);
    assert!(!introspect::index_exists(&test.db, "idx_districts_code").await?);

    Ok(())
}

/// Tests the spatial extension hook on a backend without extensions.
///
/// Expected: Ok as a no-op
#[tokio::test]
async fn spatial_extension_is_noop_outside_postgres() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    let result = relation::enable_spatial_extension(&test.db).await;

    assert!(result.is_ok(), "Error: {:?}", result);

    Ok(())
}
