//! Tests for the postcode repository's lifecycle surface: create_relation,
//! destroy_relation, and the combined setup_table rebuild.

use super::*;

/// Tests creating the relation when one already exists.
///
/// Expected: Err(RelationConflict) naming the postcodes relation
#[tokio::test]
async fn create_fails_on_existing_relation() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    let repo = PostcodeRepository::new(&test.db);
    repo.create_relation().await.expect("first create");

    let result = repo.create_relation().await;

    match result {
        Err(ImportError::StoreError(StoreError::RelationConflict { relation })) => {
            assert_eq!(relation, "postcodes");
        }
        other => panic!("expected relation conflict, got {:?}", other),
    }

    Ok(())
}

/// Tests destroying the relation twice.
///
/// Expected: Ok both times
#[tokio::test]
async fn destroy_is_idempotent() -> Result<(), TestError> {
    let test = seeded_context().await?;

    let repo = PostcodeRepository::new(&test.db);
    let first = repo.destroy_relation().await;
    let second = repo.destroy_relation().await;

    assert!(first.is_ok(), "Error: {:?}", first);
    assert!(second.is_ok(), "Error: {:?}", second);
    assert!(!relation::relation_exists(&test.db, repo.relation()).await?);

    Ok(())
}

/// Tests the combined rebuild over a relation that already holds rows.
///
/// Expected: Ok with the seed count, not doubled rows
#[tokio::test]
async fn setup_table_replaces_existing_rows() -> Result<(), TestError> {
    let test = seeded_context().await?;

    let repo = PostcodeRepository::new(&test.db);
    let result = repo.setup_table(&seed_source()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), constant::SEED_LIVE_POSTCODES);
    assert_eq!(
        repo.count().await.expect("count"),
        constant::SEED_LIVE_POSTCODES
    );

    Ok(())
}
