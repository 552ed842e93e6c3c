//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::domain::GeoPoint;

pub mod device;
pub mod impact;
pub mod panic_button;
pub mod route;
pub mod user;

/// JSONB payload for coordinate columns, stored under the legacy key names
/// carried by previously persisted documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Coordinates {
    #[serde(rename = "latitud")]
    pub latitude: f64,
    #[serde(rename = "longitud")]
    pub longitude: f64,
}

impl From<GeoPoint> for Coordinates {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

impl From<Coordinates> for GeoPoint {
    fn from(coords: Coordinates) -> Self {
        GeoPoint::new(coords.latitude, coords.longitude)
    }
}
