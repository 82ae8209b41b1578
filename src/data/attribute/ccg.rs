//! Clinical commissioning groups, loaded from `ccgs.json`.

use sea_orm::ActiveValue;

use super::{AttributeEntity, AttributeRepository};
use crate::data::relation::relation_name;

pub type CcgRepository<'a, C> = AttributeRepository<'a, C, entity::prelude::Ccg>;

impl AttributeEntity for entity::prelude::Ccg {
    const RELATION: &'static str = relation_name::CCGS;
    const DOCUMENT: &'static str = "ccgs.json";
    const CODE_INDEX: &'static str = "idx_ccgs_code";

    fn code_column() -> entity::ccg::Column {
        entity::ccg::Column::Code
    }

    fn model(code: String, name: String) -> entity::ccg::ActiveModel {
        entity::ccg::ActiveModel {
            code: ActiveValue::Set(code),
            name: ActiveValue::Set(name),
            ..Default::default()
        }
    }
}
