//! Panic button database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{PanicButton, PanicStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "panic_buttons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    #[sea_orm(unique)]
    pub device_id: Uuid,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for PanicButton {
    fn from(model: Model) -> Self {
        PanicButton {
            id: model.id,
            user_id: model.user_id,
            device_id: model.device_id,
            status: PanicStatus::from(model.status.as_str()),
        }
    }
}
