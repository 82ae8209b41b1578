//! Postcode row factories with default test values.

use sea_orm::ActiveValue;

/// A live, not-yet-geocoded postcode row.
///
/// Grid coordinates are set; longitude and latitude stay null, matching a
/// row after the seed stage and before geolocation.
pub fn live_model(postcode: &str, eastings: i32, northings: i32) -> entity::postcode::ActiveModel {
    let (outcode, incode) = postcode.split_once(' ').unwrap_or((postcode, ""));

    entity::postcode::ActiveModel {
        postcode: ActiveValue::Set(postcode.to_string()),
        pc_compact: ActiveValue::Set(postcode.replace(' ', "")),
        outcode: ActiveValue::Set(outcode.to_string()),
        incode: ActiveValue::Set(incode.to_string()),
        eastings: ActiveValue::Set(eastings),
        northings: ActiveValue::Set(northings),
        quality: ActiveValue::Set(1),
        usertype: ActiveValue::Set(Some(0)),
        date_introduced: ActiveValue::Set(Some("198001".to_string())),
        ..Default::default()
    }
}

/// A live, geocoded postcode row.
pub fn geocoded_model(
    postcode: &str,
    eastings: i32,
    northings: i32,
    longitude: f64,
    latitude: f64,
) -> entity::postcode::ActiveModel {
    let mut model = live_model(postcode, eastings, northings);
    model.longitude = ActiveValue::Set(Some(longitude));
    model.latitude = ActiveValue::Set(Some(latitude));
    model
}
