use sea_orm::entity::prelude::*;

/// A named place from the gazetteer, with its bounding envelope in grid
/// coordinates.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "places")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub name_1: String,
    pub name_1_lang: Option<String>,
    pub name_2: Option<String>,
    pub name_2_lang: Option<String>,
    pub local_type: String,
    pub outcode: String,
    pub county_unitary: Option<String>,
    pub county_unitary_type: Option<String>,
    pub district_borough: Option<String>,
    pub district_borough_type: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub eastings: i32,
    pub northings: i32,
    pub min_eastings: i32,
    pub min_northings: i32,
    pub max_eastings: i32,
    pub max_northings: i32,
    #[sea_orm(column_type = "Double", nullable)]
    pub longitude: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub latitude: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
