//! Tests for OutcodeRepository::setup_table.
//!
//! This module verifies the aggregate rebuild: one deterministic row per
//! distinct live outcode, mean positions, sorted admin code lists, and the
//! grid fallback for outcodes with no geocoded members.

use super::*;
use crate::geo::grid_to_wgs84;

/// Tests aggregating the seeded, geocoded relation.
///
/// Expected: Ok with one row per distinct outcode and the unique index
#[tokio::test]
async fn aggregates_live_outcodes() -> Result<(), TestError> {
    let test = geocoded_context().await?;

    let repo = OutcodeRepository::new(&test.db);
    let result = repo.setup_table(&seed_source()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), constant::SEED_OUTCODES);

    for outcode in constant::SEED_OUTCODE_NAMES {
        let row = entity::prelude::Outcode::find()
            .filter(entity::outcode::Column::Outcode.eq(outcode))
            .one(&test.db)
            .await?;
        assert!(row.is_some(), "missing outcode {outcode}");
    }
    assert!(introspect::index_exists(&test.db, "idx_outcodes_outcode").await?);

    Ok(())
}

/// Tests the admin code lists collected per outcode.
///
/// Expected: sorted unique JSON arrays of the codes observed across the
/// outcode's postcodes
#[tokio::test]
async fn collects_sorted_admin_codes() -> Result<(), TestError> {
    let test = geocoded_context().await?;

    let repo = OutcodeRepository::new(&test.db);
    repo.setup_table(&seed_source()).await.expect("setup");

    let aberdeen = entity::prelude::Outcode::find()
        .filter(entity::outcode::Column::Outcode.eq("AB10"))
        .one(&test.db)
        .await?
        .expect("AB10 aggregated");
    assert_eq!(aberdeen.admin_district, serde_json::json!(["S12000033"]));
    assert_eq!(aberdeen.country, serde_json::json!(["S92000003"]));
    assert_eq!(
        aberdeen.admin_ward,
        serde_json::json!(["S13002842", "S13002844"])
    );
    assert_eq!(aberdeen.parish, serde_json::json!([]));

    let cambridge = entity::prelude::Outcode::find()
        .filter(entity::outcode::Column::Outcode.eq("CB4"))
        .one(&test.db)
        .await?
        .expect("CB4 aggregated");
    assert_eq!(cambridge.admin_county, serde_json::json!(["E10000003"]));
    assert_eq!(cambridge.parish, serde_json::json!(["E04001121"]));

    Ok(())
}

/// Tests the aggregate position against the member rows.
///
/// Expected: grid means inside the members' range and coordinates equal to
/// the mean of the members' coordinates
#[tokio::test]
async fn averages_member_positions() -> Result<(), TestError> {
    let test = geocoded_context().await?;

    let repo = OutcodeRepository::new(&test.db);
    repo.setup_table(&seed_source()).await.expect("setup");

    let members = entity::prelude::Postcode::find()
        .filter(entity::postcode::Column::Outcode.eq("AB10"))
        .all(&test.db)
        .await?;
    let count = members.len() as f64;
    let mean_longitude: f64 = members
        .iter()
        .map(|m| m.longitude.expect("geocoded"))
        .sum::<f64>()
        / count;
    let mean_latitude: f64 = members
        .iter()
        .map(|m| m.latitude.expect("geocoded"))
        .sum::<f64>()
        / count;

    let row = entity::prelude::Outcode::find()
        .filter(entity::outcode::Column::Outcode.eq("AB10"))
        .one(&test.db)
        .await?
        .expect("AB10 aggregated");

    let (min_e, max_e) = (
        members.iter().map(|m| m.eastings).min().unwrap(),
        members.iter().map(|m| m.eastings).max().unwrap(),
    );
    assert!((min_e..=max_e).contains(&row.eastings));
    assert!((row.longitude - mean_longitude).abs() < 1e-9);
    assert!((row.latitude - mean_latitude).abs() < 1e-9);

    Ok(())
}

/// Tests aggregation over a relation that skipped the geolocation stage.
///
/// Expected: coordinates fall back to transforming the mean grid position
#[tokio::test]
async fn ungeocoded_members_fall_back_to_mean_grid() -> Result<(), TestError> {
    let test = TestContext::new().await?;

    let postcode_repo = PostcodeRepository::new(&test.db);
    postcode_repo
        .create_relation()
        .await
        .expect("create postcode relation");
    postcode_repo
        .seed(&seed_fixtures::onspd_csv())
        .await
        .expect("seed postcode relation");

    let repo = OutcodeRepository::new(&test.db);
    repo.setup_table(&seed_source()).await.expect("setup");

    let members = entity::prelude::Postcode::find()
        .filter(entity::postcode::Column::Outcode.eq("AB11"))
        .all(&test.db)
        .await?;
    let mean_eastings =
        (members.iter().map(|m| i64::from(m.eastings)).sum::<i64>() / members.len() as i64) as i32;
    let mean_northings =
        (members.iter().map(|m| i64::from(m.northings)).sum::<i64>() / members.len() as i64) as i32;
    let expected = grid_to_wgs84(f64::from(mean_eastings), f64::from(mean_northings));

    let row = entity::prelude::Outcode::find()
        .filter(entity::outcode::Column::Outcode.eq("AB11"))
        .one(&test.db)
        .await?
        .expect("AB11 aggregated");

    assert_eq!(row.eastings, mean_eastings);
    assert_eq!(row.northings, mean_northings);
    assert!((row.longitude - expected.longitude).abs() < 1e-9);
    assert!((row.latitude - expected.latitude).abs() < 1e-9);

    Ok(())
}

/// Tests that every live outcode resolves to an aggregate row.
///
/// Expected: a lookup by each distinct postcode outcode finds a row
#[tokio::test]
async fn every_live_outcode_resolves() -> Result<(), TestError> {
    let test = geocoded_context().await?;

    let repo = OutcodeRepository::new(&test.db);
    repo.setup_table(&seed_source()).await.expect("setup");

    let postcodes = entity::prelude::Postcode::find().all(&test.db).await?;
    for postcode in postcodes {
        let row = entity::prelude::Outcode::find()
            .filter(entity::outcode::Column::Outcode.eq(postcode.outcode.clone()))
            .one(&test.db)
            .await?;
        assert!(row.is_some(), "unresolvable outcode {}", postcode.outcode);
    }

    Ok(())
}
