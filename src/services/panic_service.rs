//! Panic button service - The emergency-alert state machine.
//!
//! The emergency transition is deliberately unguarded: crash and panic
//! signals are highest-priority and must overwrite any prior status.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreatePanicButton, NewPanicButton, PanicButton, PanicStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::PanicButtonRepository;

/// Panic button service trait for dependency injection.
#[async_trait]
pub trait PanicService: Send + Sync {
    /// Get the button attached to a device
    async fn get_by_device(&self, device_id: Uuid) -> AppResult<PanicButton>;

    /// Create a standalone button; the status defaults to inactive.
    /// A device may hold at most one button.
    async fn create_button(&self, data: CreatePanicButton) -> AppResult<PanicButton>;

    /// Remote emergency trigger: force the button to emergency regardless
    /// of its current state
    async fn activate_emergency(&self, device_id: Uuid) -> AppResult<PanicButton>;

    /// Operator override: move the button to an arbitrary state
    async fn set_status(&self, device_id: Uuid, status: PanicStatus) -> AppResult<PanicButton>;

    /// Delete button by ID, returning the removed row
    async fn delete_button(&self, id: Uuid) -> AppResult<PanicButton>;
}

/// Concrete implementation of PanicService using repository.
pub struct PanicManager {
    buttons: Arc<dyn PanicButtonRepository>,
}

impl PanicManager {
    /// Create new panic service instance with repository
    pub fn new(buttons: Arc<dyn PanicButtonRepository>) -> Self {
        Self { buttons }
    }
}

#[async_trait]
impl PanicService for PanicManager {
    async fn get_by_device(&self, device_id: Uuid) -> AppResult<PanicButton> {
        self.buttons
            .find_by_device(device_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create_button(&self, data: CreatePanicButton) -> AppResult<PanicButton> {
        if self.buttons.find_by_device(data.device_id).await?.is_some() {
            return Err(AppError::conflict("Panic button"));
        }

        self.buttons
            .create(NewPanicButton {
                device_id: data.device_id,
                user_id: data.user_id,
                status: data.status.unwrap_or(PanicStatus::Inactive),
            })
            .await
    }

    async fn activate_emergency(&self, device_id: Uuid) -> AppResult<PanicButton> {
        let button = self
            .buttons
            .set_status_by_device(device_id, PanicStatus::Emergency)
            .await?;

        tracing::warn!(device_id = %device_id, "panic button forced to emergency");
        Ok(button)
    }

    async fn set_status(&self, device_id: Uuid, status: PanicStatus) -> AppResult<PanicButton> {
        self.buttons.set_status_by_device(device_id, status).await
    }

    async fn delete_button(&self, id: Uuid) -> AppResult<PanicButton> {
        self.buttons.delete(id).await
    }
}
