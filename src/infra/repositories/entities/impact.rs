//! Impact database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Impact;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "impacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub device_id: Uuid,
    pub value: f64,
    pub impact_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Impact {
    fn from(model: Model) -> Self {
        Impact {
            id: model.id,
            device_id: model.device_id,
            value: model.value,
            impact_date: model.impact_date,
        }
    }
}
