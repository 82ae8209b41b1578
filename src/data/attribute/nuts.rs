//! NUTS statistical regions, loaded from `nuts.json`.

use sea_orm::ActiveValue;

use super::{AttributeEntity, AttributeRepository};
use crate::data::relation::relation_name;

pub type NutsRepository<'a, C> = AttributeRepository<'a, C, entity::prelude::Nuts>;

impl AttributeEntity for entity::prelude::Nuts {
    const RELATION: &'static str = relation_name::NUTS;
    const DOCUMENT: &'static str = "nuts.json";
    const CODE_INDEX: &'static str = "idx_nuts_code";

    fn code_column() -> entity::nuts::Column {
        entity::nuts::Column::Code
    }

    fn model(code: String, name: String) -> entity::nuts::ActiveModel {
        entity::nuts::ActiveModel {
            code: ActiveValue::Set(code),
            name: ActiveValue::Set(name),
            ..Default::default()
        }
    }
}
