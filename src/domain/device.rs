//! Device domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{DEVICE_STATUS_ACTIVE, DEVICE_STATUS_INACTIVE, INITIAL_UPDATE_TIME};
use crate::domain::{GeoPoint, PanicStatus};

/// Device operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DeviceStatus {
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "inactivo")]
    Inactive,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Active => DEVICE_STATUS_ACTIVE,
            DeviceStatus::Inactive => DEVICE_STATUS_INACTIVE,
        }
    }
}

impl From<&str> for DeviceStatus {
    fn from(s: &str) -> Self {
        match s {
            DEVICE_STATUS_INACTIVE => DeviceStatus::Inactive,
            _ => DeviceStatus::Active,
        }
    }
}

impl From<String> for DeviceStatus {
    fn from(s: String) -> Self {
        DeviceStatus::from(s.as_str())
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check whether a device status literal is one of the accepted values
pub fn is_valid_device_status(status: &str) -> bool {
    status == DEVICE_STATUS_ACTIVE || status == DEVICE_STATUS_INACTIVE
}

/// A field unit reporting GPS position, carrying a shock sensor and a
/// panic button.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Device {
    pub id: Uuid,
    pub gps: GeoPoint,
    pub last_update_date: DateTime<Utc>,
    /// Clock string as reported by the unit, `"00:00:00"` until the first
    /// position report arrives.
    pub last_update_time: String,
    pub status: DeviceStatus,
}

impl Device {
    /// Build a freshly provisioned device: parked at the origin, active,
    /// stamped with the current time.
    pub fn provisioned(id: Uuid) -> Self {
        Self {
            id,
            gps: GeoPoint::origin(),
            last_update_date: Utc::now(),
            last_update_time: INITIAL_UPDATE_TIME.to_string(),
            status: DeviceStatus::Active,
        }
    }
}

/// Full replacement payload for a device update.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceUpdate {
    pub gps: GeoPoint,
    pub last_update_date: DateTime<Utc>,
    pub last_update_time: String,
    pub status: DeviceStatus,
}

/// A device merged with its incident context: how many impacts it has
/// recorded and the state of its panic button (`None` when the button row
/// is missing, which is degraded data rather than an error).
#[derive(Debug, Clone)]
pub struct DeviceDetails {
    pub device: Device,
    pub impacts: u64,
    pub button_status: Option<PanicStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_literals() {
        assert_eq!(DeviceStatus::Active.as_str(), "activo");
        assert_eq!(DeviceStatus::Inactive.as_str(), "inactivo");
        assert_eq!(DeviceStatus::from("inactivo"), DeviceStatus::Inactive);
        assert_eq!(DeviceStatus::from("activo"), DeviceStatus::Active);
    }

    #[test]
    fn test_provisioned_defaults() {
        let id = Uuid::new_v4();
        let device = Device::provisioned(id);

        assert_eq!(device.id, id);
        assert!(device.gps.is_origin());
        assert_eq!(device.last_update_time, "00:00:00");
        assert_eq!(device.status, DeviceStatus::Active);
    }
}
