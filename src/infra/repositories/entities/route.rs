//! Route database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::Coordinates;
use crate::domain::Route;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "routes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub device_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub start_location: Coordinates,
    #[sea_orm(column_type = "JsonBinary")]
    pub end_location: Coordinates,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Route {
    fn from(model: Model) -> Self {
        Route {
            id: model.id,
            device_id: model.device_id,
            name: model.name,
            start_location: model.start_location.into(),
            end_location: model.end_location.into(),
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}
