//! Parliamentary constituencies, loaded from `constituencies.json`.

use sea_orm::ActiveValue;

use super::{AttributeEntity, AttributeRepository};
use crate::data::relation::relation_name;

pub type ConstituencyRepository<'a, C> = AttributeRepository<'a, C, entity::prelude::Constituency>;

impl AttributeEntity for entity::prelude::Constituency {
    const RELATION: &'static str = relation_name::CONSTITUENCIES;
    const DOCUMENT: &'static str = "constituencies.json";
    const CODE_INDEX: &'static str = "idx_constituencies_code";

    fn code_column() -> entity::constituency::Column {
        entity::constituency::Column::Code
    }

    fn model(code: String, name: String) -> entity::constituency::ActiveModel {
        entity::constituency::ActiveModel {
            code: ActiveValue::Set(code),
            name: ActiveValue::Set(name),
            ..Default::default()
        }
    }
}
