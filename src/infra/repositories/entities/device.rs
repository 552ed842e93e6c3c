//! Device database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::Coordinates;
use crate::domain::{Device, DeviceStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub gps: Coordinates,
    pub last_update_date: DateTimeUtc,
    pub last_update_time: String,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Device {
    fn from(model: Model) -> Self {
        Device {
            id: model.id,
            gps: model.gps.into(),
            last_update_date: model.last_update_date,
            last_update_time: model.last_update_time,
            status: DeviceStatus::from(model.status.as_str()),
        }
    }
}
