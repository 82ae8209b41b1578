//! Electoral wards, loaded from `wards.json`.

use sea_orm::ActiveValue;

use super::{AttributeEntity, AttributeRepository};
use crate::data::relation::relation_name;

pub type WardRepository<'a, C> = AttributeRepository<'a, C, entity::prelude::Ward>;

impl AttributeEntity for entity::prelude::Ward {
    const RELATION: &'static str = relation_name::WARDS;
    const DOCUMENT: &'static str = "wards.json";
    const CODE_INDEX: &'static str = "idx_wards_code";

    fn code_column() -> entity::ward::Column {
        entity::ward::Column::Code
    }

    fn model(code: String, name: String) -> entity::ward::ActiveModel {
        entity::ward::ActiveModel {
            code: ActiveValue::Set(code),
            name: ActiveValue::Set(name),
            ..Default::default()
        }
    }
}
