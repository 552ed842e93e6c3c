//! Impact (shock reading) domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A recorded shock-sensor reading associated with a device.
///
/// Append-mostly log semantics: rows are written once and only changed
/// through an explicit edit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Impact {
    pub id: Uuid,
    pub device_id: Uuid,
    /// Shock magnitude as reported by the sensor
    pub value: f64,
    pub impact_date: DateTime<Utc>,
}

/// Fields required to persist a new impact reading.
#[derive(Debug, Clone, PartialEq)]
pub struct NewImpact {
    pub device_id: Uuid,
    pub value: f64,
    pub impact_date: DateTime<Utc>,
}

/// Recording request; the timestamp defaults to now when omitted.
#[derive(Debug, Clone)]
pub struct RecordImpact {
    pub device_id: Uuid,
    pub value: f64,
    pub impact_date: Option<DateTime<Utc>>,
}

/// Per-field optional impact edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImpactUpdate {
    pub device_id: Option<Uuid>,
    pub value: Option<f64>,
    pub impact_date: Option<DateTime<Utc>>,
}
