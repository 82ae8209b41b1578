//! Civil parishes, loaded from `parishes.json`.

use sea_orm::ActiveValue;

use super::{AttributeEntity, AttributeRepository};
use crate::data::relation::relation_name;

pub type ParishRepository<'a, C> = AttributeRepository<'a, C, entity::prelude::Parish>;

impl AttributeEntity for entity::prelude::Parish {
    const RELATION: &'static str = relation_name::PARISHES;
    const DOCUMENT: &'static str = "parishes.json";
    const CODE_INDEX: &'static str = "idx_parishes_code";

    fn code_column() -> entity::parish::Column {
        entity::parish::Column::Code
    }

    fn model(code: String, name: String) -> entity::parish::ActiveModel {
        entity::parish::ActiveModel {
            code: ActiveValue::Set(code),
            name: ActiveValue::Set(name),
            ..Default::default()
        }
    }
}
