//! Geographic coordinate value object.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A GPS coordinate pair.
///
/// Serialized under the key names carried by previously stored documents
/// (`latitud`/`longitud`) so existing consumers keep working.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    #[serde(rename = "latitud")]
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    #[schema(example = 19.4326)]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(rename = "longitud")]
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    #[schema(example = -99.1332)]
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Placeholder position written at device provisioning and used as the
    /// end location of a route that has not been closed yet.
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn is_origin(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::origin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_zero_pair() {
        let origin = GeoPoint::origin();
        assert_eq!(origin.latitude, 0.0);
        assert_eq!(origin.longitude, 0.0);
        assert!(origin.is_origin());
        assert!(!GeoPoint::new(10.0, 20.0).is_origin());
    }

    #[test]
    fn test_serializes_with_legacy_keys() {
        let json = serde_json::to_value(GeoPoint::new(10.5, -20.25)).unwrap();
        assert_eq!(json["latitud"], 10.5);
        assert_eq!(json["longitud"], -20.25);
    }
}
