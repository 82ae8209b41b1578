//! End-to-end pipeline runs over the bundled seed source.
//!
//! These tests execute all nine stages against an in-memory database and
//! verify the success contract: every live row geocoded, one aggregate row
//! per outcode, terminated rows in their own relation, indexes present.

use std::collections::BTreeSet;

use cairn::data::postcode::index_name;
use cairn::data::relation;
use cairn::import::{ImportPipeline, PipelineState, Stage};
use cairn_test_utils::{constant, introspect, TestContext, TestError};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use super::seed_source;

/// Tests a full run against an empty database.
///
/// Expected: Ok with the seed counts, state Succeeded, all stages completed
#[tokio::test]
async fn run_succeeds_on_seed_source() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    let mut pipeline = ImportPipeline::new(&test.db, seed_source());
    let result = pipeline.run().await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let summary = result.unwrap();
    assert_eq!(summary.postcodes_seeded, constant::SEED_LIVE_POSTCODES);
    assert_eq!(summary.postcodes_geocoded, constant::SEED_LIVE_POSTCODES);
    assert_eq!(summary.outcodes, constant::SEED_OUTCODES);
    assert_eq!(
        summary.terminated_postcodes,
        constant::SEED_TERMINATED_POSTCODES
    );

    assert_eq!(pipeline.state(), PipelineState::Succeeded);
    assert_eq!(pipeline.completed_stages(), Stage::ORDER);

    Ok(())
}

/// Tests that a successful run leaves no row ungeocoded.
///
/// Expected: zero rows with a null longitude, every coordinate on the globe
#[tokio::test]
async fn run_geocodes_every_live_row() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    ImportPipeline::new(&test.db, seed_source())
        .run()
        .await
        .expect("pipeline run");

    let ungeocoded = entity::prelude::Postcode::find()
        .filter(entity::postcode::Column::Longitude.is_null())
        .count(&test.db)
        .await?;
    assert_eq!(ungeocoded, 0);

    for row in entity::prelude::Postcode::find().all(&test.db).await? {
        let longitude = row.longitude.expect("longitude");
        let latitude = row.latitude.expect("latitude");
        assert!(
            (-9.0..2.0).contains(&longitude) && (49.0..61.0).contains(&latitude),
            "{} geocoded outside Great Britain: {longitude}, {latitude}",
            row.postcode
        );
    }

    Ok(())
}

/// Tests aggregate completeness over the live postcode set.
///
/// Expected: exactly one outcode row for every distinct outcode
#[tokio::test]
async fn run_builds_complete_outcode_aggregate() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    ImportPipeline::new(&test.db, seed_source())
        .run()
        .await
        .expect("pipeline run");

    let outcodes: BTreeSet<String> = entity::prelude::Postcode::find()
        .all(&test.db)
        .await?
        .into_iter()
        .map(|row| row.outcode)
        .collect();
    assert_eq!(outcodes.len() as u64, constant::SEED_OUTCODES);

    for outcode in &outcodes {
        let rows = entity::prelude::Outcode::find()
            .filter(entity::outcode::Column::Outcode.eq(outcode.as_str()))
            .count(&test.db)
            .await?;
        assert_eq!(rows, 1, "expected exactly one aggregate row for {outcode}");
    }

    let total = entity::prelude::Outcode::find().count(&test.db).await?;
    assert_eq!(total, constant::SEED_OUTCODES);

    Ok(())
}

/// Tests that the index rebuild stage leaves the lookup and spatial
/// indexes in place.
///
/// Expected: all four postcode indexes and the outcode index present
#[tokio::test]
async fn run_rebuilds_indexes() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    ImportPipeline::new(&test.db, seed_source())
        .run()
        .await
        .expect("pipeline run");

    for name in [
        index_name::POSTCODE,
        index_name::PC_COMPACT,
        index_name::OUTCODE,
        index_name::LOCATION,
        "idx_outcodes_outcode",
    ] {
        assert!(
            introspect::index_exists(&test.db, name).await?,
            "missing index {name}"
        );
    }

    Ok(())
}

/// Tests the live/terminated split.
///
/// Expected: terminated rows only in their own relation, no postcode in both
#[tokio::test]
async fn run_splits_terminated_postcodes() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    ImportPipeline::new(&test.db, seed_source())
        .run()
        .await
        .expect("pipeline run");

    let terminated = entity::prelude::TerminatedPostcode::find()
        .all(&test.db)
        .await?;
    assert_eq!(
        terminated.len() as u64,
        constant::SEED_TERMINATED_POSTCODES
    );

    let live: BTreeSet<String> = entity::prelude::Postcode::find()
        .all(&test.db)
        .await?
        .into_iter()
        .map(|row| row.pc_compact)
        .collect();
    for row in &terminated {
        assert!(
            !live.contains(&row.pc_compact),
            "{} present in both relations",
            row.postcode
        );
        assert!(row.longitude.is_some() && row.latitude.is_some());
    }

    Ok(())
}

/// Tests running the pipeline twice against the same database.
///
/// Expected: the second run replaces the first wholesale, counts unchanged
#[tokio::test]
async fn rerun_replaces_previous_import() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    ImportPipeline::new(&test.db, seed_source())
        .run()
        .await
        .expect("first run");
    let second = ImportPipeline::new(&test.db, seed_source()).run().await;

    assert!(second.is_ok(), "Error: {:?}", second);
    let summary = second.unwrap();
    assert_eq!(summary.postcodes_seeded, constant::SEED_LIVE_POSTCODES);

    let rows = entity::prelude::Postcode::find().count(&test.db).await?;
    assert_eq!(rows, constant::SEED_LIVE_POSTCODES);
    assert!(relation::relation_exists(&test.db, "postcodes").await?);

    Ok(())
}
