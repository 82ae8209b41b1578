use sea_orm::entity::prelude::*;

/// Aggregate row for one outward code, derived from the live postcodes.
///
/// Coordinates are the mean position of the outcode's postcodes. The
/// administrative fields hold the sorted set of codes observed across the
/// outcode, stored as JSON arrays.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "outcodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub outcode: String,
    pub eastings: i32,
    pub northings: i32,
    #[sea_orm(column_type = "Double")]
    pub longitude: f64,
    #[sea_orm(column_type = "Double")]
    pub latitude: f64,
    pub admin_district: Json,
    pub admin_county: Json,
    pub admin_ward: Json,
    pub parish: Json,
    pub country: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
