//! Tests for PostcodeRepository::create_indexes.

use super::*;

/// Tests index creation on a seeded relation.
///
/// Expected: Ok with all four managed indexes present
#[tokio::test]
async fn creates_managed_indexes() -> Result<(), TestError> {
    let test = seeded_context().await?;

    let repo = PostcodeRepository::new(&test.db);
    let result = repo.create_indexes().await;

    assert!(result.is_ok(), "Error: {:?}", result);
    for name in [
        index_name::POSTCODE,
        index_name::PC_COMPACT,
        index_name::OUTCODE,
        index_name::LOCATION,
    ] {
        assert!(
            introspect::index_exists(&test.db, name).await?,
            "missing index {name}"
        );
    }

    Ok(())
}

/// Tests rebuilding indexes that already exist.
///
/// Expected: Ok; the drop-first pass makes the rebuild safe to repeat
#[tokio::test]
async fn rebuild_is_repeatable() -> Result<(), TestError> {
    let test = seeded_context().await?;

    let repo = PostcodeRepository::new(&test.db);
    repo.create_indexes().await.expect("first rebuild");

    let result = repo.create_indexes().await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert!(introspect::index_exists(&test.db, index_name::POSTCODE).await?);

    Ok(())
}
