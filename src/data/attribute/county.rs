//! Counties, loaded from `counties.json`.

use sea_orm::ActiveValue;

use super::{AttributeEntity, AttributeRepository};
use crate::data::relation::relation_name;

pub type CountyRepository<'a, C> = AttributeRepository<'a, C, entity::prelude::County>;

impl AttributeEntity for entity::prelude::County {
    const RELATION: &'static str = relation_name::COUNTIES;
    const DOCUMENT: &'static str = "counties.json";
    const CODE_INDEX: &'static str = "idx_counties_code";

    fn code_column() -> entity::county::Column {
        entity::county::Column::Code
    }

    fn model(code: String, name: String) -> entity::county::ActiveModel {
        entity::county::ActiveModel {
            code: ActiveValue::Set(code),
            name: ActiveValue::Set(name),
            ..Default::default()
        }
    }
}
