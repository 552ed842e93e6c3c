//! Panic button repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::panic_button::{self, ActiveModel, Entity as PanicButtonEntity};
use crate::domain::{NewPanicButton, PanicButton, PanicStatus};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Panic button repository trait for dependency injection.
///
/// Status operations address the button by its device id: that is how the
/// remote trigger and operator paths identify it.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PanicButtonRepository: Send + Sync {
    /// Persist a new panic button
    async fn create(&self, data: NewPanicButton) -> AppResult<PanicButton>;

    /// Find panic button by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PanicButton>>;

    /// Find the panic button attached to a device
    async fn find_by_device(&self, device_id: Uuid) -> AppResult<Option<PanicButton>>;

    /// List all panic buttons
    async fn list(&self) -> AppResult<Vec<PanicButton>>;

    /// Overwrite the status of the button attached to a device
    async fn set_status_by_device(
        &self,
        device_id: Uuid,
        status: PanicStatus,
    ) -> AppResult<PanicButton>;

    /// Delete panic button by ID, returning the removed row
    async fn delete(&self, id: Uuid) -> AppResult<PanicButton>;

    /// Delete the button attached to a device; `None` when there was none
    async fn delete_by_device(&self, device_id: Uuid) -> AppResult<Option<PanicButton>>;
}

/// Concrete implementation of PanicButtonRepository backed by SeaORM
pub struct PanicButtonStore {
    db: DatabaseConnection,
}

impl PanicButtonStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PanicButtonRepository for PanicButtonStore {
    async fn create(&self, data: NewPanicButton) -> AppResult<PanicButton> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(data.user_id),
            device_id: Set(data.device_id),
            status: Set(data.status.to_string()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(PanicButton::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PanicButton>> {
        let result = PanicButtonEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(PanicButton::from))
    }

    async fn find_by_device(&self, device_id: Uuid) -> AppResult<Option<PanicButton>> {
        let result = PanicButtonEntity::find()
            .filter(panic_button::Column::DeviceId.eq(device_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(PanicButton::from))
    }

    async fn list(&self) -> AppResult<Vec<PanicButton>> {
        let models = PanicButtonEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(PanicButton::from).collect())
    }

    async fn set_status_by_device(
        &self,
        device_id: Uuid,
        status: PanicStatus,
    ) -> AppResult<PanicButton> {
        let button = PanicButtonEntity::find()
            .filter(panic_button::Column::DeviceId.eq(device_id))
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = button.into();
        active.status = Set(status.to_string());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(PanicButton::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<PanicButton> {
        let model = PanicButtonEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let button = PanicButton::from(model.clone());
        model.delete(&self.db).await.map_err(AppError::from)?;
        Ok(button)
    }

    async fn delete_by_device(&self, device_id: Uuid) -> AppResult<Option<PanicButton>> {
        let Some(model) = PanicButtonEntity::find()
            .filter(panic_button::Column::DeviceId.eq(device_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let button = PanicButton::from(model.clone());
        model.delete(&self.db).await.map_err(AppError::from)?;
        Ok(Some(button))
    }
}
