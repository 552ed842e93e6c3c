//! Panic button domain entity and its status state machine.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{PANIC_STATUS_ACTIVE, PANIC_STATUS_EMERGENCY, PANIC_STATUS_INACTIVE};

/// Panic button states.
///
/// `Emergency` is reachable from any state through the remote activation
/// path; crash and panic signals must never be blocked by a stale
/// intermediate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PanicStatus {
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "inactivo")]
    Inactive,
    #[serde(rename = "emergencia")]
    Emergency,
}

impl PanicStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanicStatus::Active => PANIC_STATUS_ACTIVE,
            PanicStatus::Inactive => PANIC_STATUS_INACTIVE,
            PanicStatus::Emergency => PANIC_STATUS_EMERGENCY,
        }
    }
}

impl From<&str> for PanicStatus {
    fn from(s: &str) -> Self {
        match s {
            PANIC_STATUS_ACTIVE => PanicStatus::Active,
            PANIC_STATUS_EMERGENCY => PanicStatus::Emergency,
            _ => PanicStatus::Inactive,
        }
    }
}

impl From<String> for PanicStatus {
    fn from(s: String) -> Self {
        PanicStatus::from(s.as_str())
    }
}

impl std::fmt::Display for PanicStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check whether a panic status literal is one of the accepted values
pub fn is_valid_panic_status(status: &str) -> bool {
    status == PANIC_STATUS_ACTIVE
        || status == PANIC_STATUS_INACTIVE
        || status == PANIC_STATUS_EMERGENCY
}

/// The emergency-alert state machine associated with one device.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PanicButton {
    pub id: Uuid,
    /// Owner of the button, when one has been linked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub device_id: Uuid,
    pub status: PanicStatus,
}

/// Fields required to persist a new panic button.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPanicButton {
    pub device_id: Uuid,
    pub user_id: Option<Uuid>,
    pub status: PanicStatus,
}

/// Standalone creation request; status defaults to inactive.
#[derive(Debug, Clone)]
pub struct CreatePanicButton {
    pub device_id: Uuid,
    pub user_id: Option<Uuid>,
    pub status: Option<PanicStatus>,
}
