use sea_orm::entity::prelude::*;

/// A live postcode from the ONS Postcode Directory.
///
/// Longitude and latitude stay null until the geolocation pass derives them
/// from the grid reference. Dates are kept in the directory's raw YYYYMM form.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "postcodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub postcode: String,
    pub pc_compact: String,
    pub outcode: String,
    pub incode: String,
    pub eastings: i32,
    pub northings: i32,
    #[sea_orm(column_type = "Double", nullable)]
    pub longitude: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub latitude: Option<f64>,
    pub quality: i32,
    pub usertype: Option<i32>,
    pub date_introduced: Option<String>,
    pub date_of_termination: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub admin_district: Option<String>,
    pub admin_county: Option<String>,
    pub admin_ward: Option<String>,
    pub parish: Option<String>,
    pub ccg: Option<String>,
    pub nuts: Option<String>,
    pub constituency: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
