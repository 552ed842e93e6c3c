//! Impact service - The incident recorder.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Impact, ImpactUpdate, NewImpact, RecordImpact};
use crate::errors::{AppError, AppResult};
use crate::infra::ImpactRepository;

/// Impact service trait for dependency injection.
#[async_trait]
pub trait ImpactService: Send + Sync {
    /// Append an impact reading; the timestamp defaults to now
    async fn record_impact(&self, data: RecordImpact) -> AppResult<Impact>;

    /// Get impact by ID
    async fn get_impact(&self, id: Uuid) -> AppResult<Impact>;

    /// List all impacts
    async fn list_impacts(&self) -> AppResult<Vec<Impact>>;

    /// List impacts recorded by one device
    async fn list_by_device(&self, device_id: Uuid) -> AppResult<Vec<Impact>>;

    /// List impacts strictly above the given magnitude (severity triage)
    async fn list_above_threshold(&self, threshold: f64) -> AppResult<Vec<Impact>>;

    /// Update impact details
    async fn update_impact(&self, id: Uuid, changes: ImpactUpdate) -> AppResult<Impact>;

    /// Delete impact by ID, returning the removed row
    async fn delete_impact(&self, id: Uuid) -> AppResult<Impact>;
}

/// Concrete implementation of ImpactService using repository.
pub struct ImpactManager {
    impacts: Arc<dyn ImpactRepository>,
}

impl ImpactManager {
    /// Create new impact service instance with repository
    pub fn new(impacts: Arc<dyn ImpactRepository>) -> Self {
        Self { impacts }
    }
}

#[async_trait]
impl ImpactService for ImpactManager {
    async fn record_impact(&self, data: RecordImpact) -> AppResult<Impact> {
        if !data.value.is_finite() || data.value < 0.0 {
            return Err(AppError::validation(
                "Impact value must be a non-negative number",
            ));
        }

        self.impacts
            .create(NewImpact {
                device_id: data.device_id,
                value: data.value,
                impact_date: data.impact_date.unwrap_or_else(Utc::now),
            })
            .await
    }

    async fn get_impact(&self, id: Uuid) -> AppResult<Impact> {
        self.impacts
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_impacts(&self) -> AppResult<Vec<Impact>> {
        self.impacts.list().await
    }

    async fn list_by_device(&self, device_id: Uuid) -> AppResult<Vec<Impact>> {
        self.impacts.list_by_device(device_id).await
    }

    async fn list_above_threshold(&self, threshold: f64) -> AppResult<Vec<Impact>> {
        self.impacts.list_above(threshold).await
    }

    async fn update_impact(&self, id: Uuid, changes: ImpactUpdate) -> AppResult<Impact> {
        self.impacts.update(id, changes).await
    }

    async fn delete_impact(&self, id: Uuid) -> AppResult<Impact> {
        self.impacts.delete(id).await
    }
}
