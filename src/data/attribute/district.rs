//! Local authority districts, loaded from `districts.json`.

use sea_orm::ActiveValue;

use super::{AttributeEntity, AttributeRepository};
use crate::data::relation::relation_name;

pub type DistrictRepository<'a, C> = AttributeRepository<'a, C, entity::prelude::District>;

impl AttributeEntity for entity::prelude::District {
    const RELATION: &'static str = relation_name::DISTRICTS;
    const DOCUMENT: &'static str = "districts.json";
    const CODE_INDEX: &'static str = "idx_districts_code";

    fn code_column() -> entity::district::Column {
        entity::district::Column::Code
    }

    fn model(code: String, name: String) -> entity::district::ActiveModel {
        entity::district::ActiveModel {
            code: ActiveValue::Set(code),
            name: ActiveValue::Set(name),
            ..Default::default()
        }
    }
}
