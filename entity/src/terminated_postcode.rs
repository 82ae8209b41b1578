use sea_orm::entity::prelude::*;

/// A postcode the directory marks as no longer in use, kept apart from the
/// live relation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "terminated_postcodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub postcode: String,
    pub pc_compact: String,
    pub year_terminated: i32,
    pub month_terminated: i32,
    pub eastings: i32,
    pub northings: i32,
    #[sea_orm(column_type = "Double", nullable)]
    pub longitude: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub latitude: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
