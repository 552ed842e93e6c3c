//! Device service - Orchestrates the device lifecycle.
//!
//! Provisioning and teardown touch two collections (devices and panic
//! buttons) as sequential writes with no transaction; a failure between
//! them leaves a partial state that is surfaced as `PartialFailure` and
//! fixed by the reconcile sweep.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Device, DeviceDetails, DeviceUpdate, NewPanicButton, PanicStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::{DeviceRepository, ImpactRepository, PanicButtonRepository};

/// Outcome of a reconcile sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Buttons created for devices that had none
    pub provisioned: usize,
    /// Orphaned buttons removed because their device is gone
    pub purged: usize,
}

/// Device service trait for dependency injection.
#[async_trait]
pub trait DeviceService: Send + Sync {
    /// Provision a device together with its (inactive) panic button
    async fn create_device(&self) -> AppResult<Device>;

    /// Get a device merged with its impact count and panic button status
    async fn get_device(&self, id: Uuid) -> AppResult<DeviceDetails>;

    /// List all devices
    async fn list_devices(&self) -> AppResult<Vec<Device>>;

    /// Count all devices
    async fn count_devices(&self) -> AppResult<u64>;

    /// Full replacement of the mutable device fields
    async fn update_device(&self, id: Uuid, changes: DeviceUpdate) -> AppResult<Device>;

    /// Tear down a device and its panic button, returning the removed device
    async fn delete_device(&self, id: Uuid) -> AppResult<Device>;

    /// Idempotent repair sweep for partial provisioning/teardown states
    async fn reconcile_panic_buttons(&self) -> AppResult<ReconcileReport>;
}

/// Concrete implementation of DeviceService using repositories.
pub struct DeviceManager {
    devices: Arc<dyn DeviceRepository>,
    impacts: Arc<dyn ImpactRepository>,
    buttons: Arc<dyn PanicButtonRepository>,
}

impl DeviceManager {
    /// Create new device service instance with repositories
    pub fn new(
        devices: Arc<dyn DeviceRepository>,
        impacts: Arc<dyn ImpactRepository>,
        buttons: Arc<dyn PanicButtonRepository>,
    ) -> Self {
        Self {
            devices,
            impacts,
            buttons,
        }
    }
}

#[async_trait]
impl DeviceService for DeviceManager {
    async fn create_device(&self) -> AppResult<Device> {
        let device = self.devices.create().await?;

        let button = NewPanicButton {
            device_id: device.id,
            user_id: None,
            status: PanicStatus::Inactive,
        };

        if let Err(e) = self.buttons.create(button).await {
            tracing::error!(
                device_id = %device.id,
                error = %e,
                "panic button provisioning failed after device insert"
            );
            return Err(AppError::partial_failure(format!(
                "device {} was created without a panic button; run the repair sweep",
                device.id
            )));
        }

        Ok(device)
    }

    async fn get_device(&self, id: Uuid) -> AppResult<DeviceDetails> {
        let device = self
            .devices
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let impacts = self.impacts.count_by_device(id).await?;
        // A missing button is degraded data, not an error
        let button_status = self.buttons.find_by_device(id).await?.map(|b| b.status);

        Ok(DeviceDetails {
            device,
            impacts,
            button_status,
        })
    }

    async fn list_devices(&self) -> AppResult<Vec<Device>> {
        self.devices.list().await
    }

    async fn count_devices(&self) -> AppResult<u64> {
        self.devices.count().await
    }

    async fn update_device(&self, id: Uuid, changes: DeviceUpdate) -> AppResult<Device> {
        self.devices.update(id, changes).await
    }

    async fn delete_device(&self, id: Uuid) -> AppResult<Device> {
        // Button first; its absence is tolerated. NotFound for the device is
        // decided by the device delete alone.
        self.buttons.delete_by_device(id).await?;
        self.devices.delete(id).await
    }

    async fn reconcile_panic_buttons(&self) -> AppResult<ReconcileReport> {
        let devices = self.devices.list().await?;
        let buttons = self.buttons.list().await?;

        let device_ids: HashSet<Uuid> = devices.iter().map(|d| d.id).collect();
        let buttoned: HashSet<Uuid> = buttons.iter().map(|b| b.device_id).collect();

        let mut provisioned = 0;
        for device in &devices {
            if !buttoned.contains(&device.id) {
                self.buttons
                    .create(NewPanicButton {
                        device_id: device.id,
                        user_id: None,
                        status: PanicStatus::Inactive,
                    })
                    .await?;
                provisioned += 1;
            }
        }

        let mut purged = 0;
        for button in &buttons {
            if !device_ids.contains(&button.device_id) {
                self.buttons.delete(button.id).await?;
                purged += 1;
            }
        }

        if provisioned > 0 || purged > 0 {
            tracing::info!(provisioned, purged, "panic button reconcile sweep applied");
        }

        Ok(ReconcileReport {
            provisioned,
            purged,
        })
    }
}
