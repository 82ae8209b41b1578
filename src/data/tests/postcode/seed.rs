//! Tests for PostcodeRepository::seed.
//!
//! This module verifies the strict bulk load of the directory CSV: live
//! rows only, derived columns present, coordinates left null for the
//! geolocation stage, and hard failure on malformed or missing sources.

use cairn_test_utils::scratch::ScratchSource;

use super::*;

/// Tests seeding the relation from the seed extract.
///
/// Expected: Ok with the live row count; terminated rows filtered out
#[tokio::test]
async fn seeds_live_rows_only() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    let repo = PostcodeRepository::new(&test.db);
    repo.create_relation().await.expect("create postcode relation");

    let result = repo.seed(&seed_fixtures::onspd_csv()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), constant::SEED_LIVE_POSTCODES);

    let terminated = entity::prelude::Postcode::find()
        .filter(entity::postcode::Column::Outcode.eq("AB1"))
        .all(&test.db)
        .await?;
    assert!(terminated.is_empty());

    Ok(())
}

/// Tests the derived columns on a seeded row.
///
/// Expected: outcode/incode/pc_compact derived, coordinates still null
#[tokio::test]
async fn derives_row_columns() -> Result<(), TestError> {
    let test = seeded_context().await?;

    let row = entity::prelude::Postcode::find()
        .filter(entity::postcode::Column::Postcode.eq("AB10 1AB"))
        .one(&test.db)
        .await?
        .expect("AB10 1AB seeded");

    assert_eq!(row.outcode, "AB10");
    assert_eq!(row.incode, "1AB");
    assert_eq!(row.pc_compact, "AB101AB");
    assert_eq!(row.eastings, 394235);
    assert_eq!(row.northings, 806529);
    assert_eq!(row.admin_district.as_deref(), Some("S12000033"));
    assert_eq!(row.country.as_deref(), Some("S92000003"));
    assert!(row.longitude.is_none());
    assert!(row.latitude.is_none());

    Ok(())
}

/// Tests seeding from a CSV with one corrupted row.
///
/// Expected: Err(MalformedRow) carrying the 1-based row number
#[tokio::test]
async fn fails_on_malformed_row() -> Result<(), TestError> {
    let mut rows = seed_fixtures::onspd_rows()?;
    rows[2] = rows[2].replace("394230", "not-a-grid-ref");
    let scratch = ScratchSource::with_postcode_rows(&rows)?;

    let test = TestContext::new().await?;
    let repo = PostcodeRepository::new(&test.db);
    repo.create_relation().await.expect("create postcode relation");

    let result = repo.seed(&scratch.postcodes).await;

    match result {
        Err(ImportError::SourceError(SourceError::MalformedRow { line, reason })) => {
            assert_eq!(line, 3);
            assert!(reason.contains("eastings"), "reason: {reason}");
        }
        other => panic!("expected malformed row, got {:?}", other),
    }

    Ok(())
}

/// Tests seeding from a path that does not exist.
///
/// Expected: Err(SourceError::Missing)
#[tokio::test]
async fn fails_on_missing_source() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    let repo = PostcodeRepository::new(&test.db);
    repo.create_relation().await.expect("create postcode relation");

    let result = repo.seed(std::path::Path::new("/nonexistent/ONSPD.csv")).await;

    assert!(matches!(
        result,
        Err(ImportError::SourceError(SourceError::Missing(_)))
    ));

    Ok(())
}
