//! Device repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, Set,
};
use uuid::Uuid;

use super::entities::device::{ActiveModel, Entity as DeviceEntity};
use crate::domain::{Device, DeviceUpdate};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Device repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Persist a freshly provisioned device (origin GPS, active, stamped now)
    async fn create(&self) -> AppResult<Device>;

    /// Find device by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Device>>;

    /// List all devices
    async fn list(&self) -> AppResult<Vec<Device>>;

    /// Count all devices
    async fn count(&self) -> AppResult<u64>;

    /// Full replacement of the mutable device fields
    async fn update(&self, id: Uuid, changes: DeviceUpdate) -> AppResult<Device>;

    /// Delete device by ID, returning the removed row
    async fn delete(&self, id: Uuid) -> AppResult<Device>;
}

/// Concrete implementation of DeviceRepository backed by SeaORM
pub struct DeviceStore {
    db: DatabaseConnection,
}

impl DeviceStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DeviceRepository for DeviceStore {
    async fn create(&self) -> AppResult<Device> {
        let device = Device::provisioned(Uuid::new_v4());

        let active_model = ActiveModel {
            id: Set(device.id),
            gps: Set(device.gps.into()),
            last_update_date: Set(device.last_update_date),
            last_update_time: Set(device.last_update_time.clone()),
            status: Set(device.status.to_string()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Device::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Device>> {
        let result = DeviceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Device::from))
    }

    async fn list(&self) -> AppResult<Vec<Device>> {
        let models = DeviceEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Device::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        DeviceEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, id: Uuid, changes: DeviceUpdate) -> AppResult<Device> {
        let device = DeviceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = device.into();
        active.gps = Set(changes.gps.into());
        active.last_update_date = Set(changes.last_update_date);
        active.last_update_time = Set(changes.last_update_time);
        active.status = Set(changes.status.to_string());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Device::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Device> {
        let model = DeviceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let device = Device::from(model.clone());
        model.delete(&self.db).await.map_err(AppError::from)?;
        Ok(device)
    }
}
