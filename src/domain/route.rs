//! Route domain entity and its open/close lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::GeoPoint;

/// A recorded trip with a start and (once closed) an end location/time.
///
/// Routes are created open: `end_date` is null and `end_location` holds the
/// origin placeholder until the finalize operation writes the real end.
/// Closing an already-closed route overwrites the end fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Route {
    pub id: Uuid,
    pub device_id: Uuid,
    pub name: String,
    #[serde(rename = "ubicacion_de_inicio")]
    pub start_location: GeoPoint,
    #[serde(rename = "ubicacion_de_final")]
    pub end_location: GeoPoint,
    pub start_date: DateTime<Utc>,
    /// Null while the route is still open
    pub end_date: Option<DateTime<Utc>>,
}

impl Route {
    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }
}

/// Fields required to persist a new (open) route.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoute {
    pub device_id: Uuid,
    pub name: String,
    pub start_location: GeoPoint,
    pub start_date: DateTime<Utc>,
}

/// Opening request; the start date defaults to now when omitted.
#[derive(Debug, Clone)]
pub struct OpenRoute {
    pub device_id: Uuid,
    pub name: String,
    pub start_location: GeoPoint,
    pub start_date: Option<DateTime<Utc>>,
}

/// Per-field optional route edit. The end fields are only reachable
/// through the close operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteUpdate {
    pub device_id: Option<Uuid>,
    pub name: Option<String>,
    pub start_location: Option<GeoPoint>,
    pub start_date: Option<DateTime<Utc>>,
}
