//! Tests for PlaceRepository::setup_table.
//!
//! This module verifies the directory ingest: every file in the places
//! directory is loaded, rows are geocoded inline, and a missing directory
//! fails the rebuild.

use super::*;

/// Tests rebuilding the place relation from the seed directory.
///
/// Expected: Ok with one row per seed place and the outcode index present
#[tokio::test]
async fn ingests_place_directory() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    let repo = PlaceRepository::new(&test.db);
    let result = repo.setup_table(&seed_source()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), constant::SEED_PLACES);
    assert!(introspect::index_exists(&test.db, "idx_places_outcode").await?);

    Ok(())
}

/// Tests the columns of an ingested place row.
///
/// Expected: names, type, envelope, and inline-geocoded coordinates
#[tokio::test]
async fn ingests_row_columns() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    let repo = PlaceRepository::new(&test.db);
    repo.setup_table(&seed_source()).await.expect("setup");

    let row = entity::prelude::Place::find()
        .filter(entity::place::Column::Name1.eq("Aberdeen"))
        .one(&test.db)
        .await?
        .expect("Aberdeen ingested");

    assert_eq!(row.local_type, "City");
    assert_eq!(row.outcode, "AB10");
    assert_eq!(row.county_unitary.as_deref(), Some("Aberdeen City"));
    assert_eq!(row.min_eastings, 392000);
    assert_eq!(row.max_northings, 808600);

    let longitude = row.longitude.expect("longitude set");
    let latitude = row.latitude.expect("latitude set");
    assert!((-3.0..-1.0).contains(&longitude), "longitude: {longitude}");
    assert!((56.0..58.0).contains(&latitude), "latitude: {latitude}");

    Ok(())
}

/// Tests rerunning setup over an already populated relation.
///
/// Expected: Ok with the same count
#[tokio::test]
async fn rerun_replaces_rows() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    let repo = PlaceRepository::new(&test.db);
    repo.setup_table(&seed_source()).await.expect("first setup");

    let result = repo.setup_table(&seed_source()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(repo.count().await.expect("count"), constant::SEED_PLACES);

    Ok(())
}

/// Tests setup against a missing places directory.
///
/// Expected: Err(SourceError::Missing)
#[tokio::test]
async fn fails_on_missing_directory() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    let mut source = seed_source();
    source.places_dir = source.places_dir.join("absent");

    let repo = PlaceRepository::new(&test.db);
    let result = repo.setup_table(&source).await;

    assert!(matches!(
        result,
        Err(ImportError::SourceError(SourceError::Missing(_)))
    ));

    Ok(())
}
