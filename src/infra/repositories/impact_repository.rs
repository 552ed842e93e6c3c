//! Impact repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::impact::{self, ActiveModel, Entity as ImpactEntity};
use crate::domain::{Impact, ImpactUpdate, NewImpact};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Impact repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ImpactRepository: Send + Sync {
    /// Append an impact reading
    async fn create(&self, data: NewImpact) -> AppResult<Impact>;

    /// Find impact by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Impact>>;

    /// List all impacts
    async fn list(&self) -> AppResult<Vec<Impact>>;

    /// List impacts recorded by one device
    async fn list_by_device(&self, device_id: Uuid) -> AppResult<Vec<Impact>>;

    /// List impacts strictly above the given magnitude
    async fn list_above(&self, threshold: f64) -> AppResult<Vec<Impact>>;

    /// Count impacts recorded by one device
    async fn count_by_device(&self, device_id: Uuid) -> AppResult<u64>;

    /// Apply a per-field optional edit
    async fn update(&self, id: Uuid, changes: ImpactUpdate) -> AppResult<Impact>;

    /// Delete impact by ID, returning the removed row
    async fn delete(&self, id: Uuid) -> AppResult<Impact>;
}

/// Concrete implementation of ImpactRepository backed by SeaORM
pub struct ImpactStore {
    db: DatabaseConnection,
}

impl ImpactStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ImpactRepository for ImpactStore {
    async fn create(&self, data: NewImpact) -> AppResult<Impact> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            device_id: Set(data.device_id),
            value: Set(data.value),
            impact_date: Set(data.impact_date),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Impact::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Impact>> {
        let result = ImpactEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Impact::from))
    }

    async fn list(&self) -> AppResult<Vec<Impact>> {
        let models = ImpactEntity::find()
            .order_by_asc(impact::Column::ImpactDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Impact::from).collect())
    }

    async fn list_by_device(&self, device_id: Uuid) -> AppResult<Vec<Impact>> {
        let models = ImpactEntity::find()
            .filter(impact::Column::DeviceId.eq(device_id))
            .order_by_asc(impact::Column::ImpactDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Impact::from).collect())
    }

    async fn list_above(&self, threshold: f64) -> AppResult<Vec<Impact>> {
        // Strict greater-than: readings equal to the threshold stay out
        let models = ImpactEntity::find()
            .filter(impact::Column::Value.gt(threshold))
            .order_by_asc(impact::Column::ImpactDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Impact::from).collect())
    }

    async fn count_by_device(&self, device_id: Uuid) -> AppResult<u64> {
        ImpactEntity::find()
            .filter(impact::Column::DeviceId.eq(device_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, id: Uuid, changes: ImpactUpdate) -> AppResult<Impact> {
        let impact = ImpactEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = impact.into();

        if let Some(device_id) = changes.device_id {
            active.device_id = Set(device_id);
        }
        if let Some(value) = changes.value {
            active.value = Set(value);
        }
        if let Some(impact_date) = changes.impact_date {
            active.impact_date = Set(impact_date);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Impact::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Impact> {
        let model = ImpactEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let impact = Impact::from(model.clone());
        model.delete(&self.db).await.map_err(AppError::from)?;
        Ok(impact)
    }
}
