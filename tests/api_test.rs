//! API contract tests.
//!
//! These exercise the serialization surface without a database: error
//! status mapping, the device success envelope, and the legacy field
//! names preserved for existing consumers.

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use uuid::Uuid;

use fleettrack::api::handlers::device_handler::DeviceDetailsResponse;
use fleettrack::domain::{
    Device, DeviceDetails, GeoPoint, PanicButton, PanicStatus, Route, User, UserResponse,
    UserRole,
};
use fleettrack::errors::AppError;
use fleettrack::types::ApiResponse;

async fn response_parts(error: AppError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_error_status_mapping() {
    let (status, body) = response_parts(AppError::NotFound).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, body) = response_parts(AppError::conflict("Email")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(body["error"]["message"], "Email already exists");

    let (status, body) = response_parts(AppError::validation("Name is required")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = response_parts(AppError::InvalidCredentials).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");

    let (status, body) = response_parts(AppError::partial_failure("device x lost its button")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "PARTIAL_FAILURE");
    // Operator guidance stays visible for partial failures
    assert_eq!(body["error"]["message"], "device x lost its button");
}

#[test]
fn test_success_envelope_shape() {
    let response = ApiResponse::success("payload".to_string());
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "payload");
    assert!(json.get("message").is_none());

    let response = ApiResponse::with_message("payload".to_string(), "done");
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["message"], "done");
}

#[test]
fn test_device_detail_reports_missing_button_sentinel() {
    let details = DeviceDetails {
        device: Device::provisioned(Uuid::new_v4()),
        impacts: 3,
        button_status: None,
    };

    let response = DeviceDetailsResponse::from(details);
    assert_eq!(response.button_status, "no existe");
    assert_eq!(response.impacts, 3);

    let details = DeviceDetails {
        device: Device::provisioned(Uuid::new_v4()),
        impacts: 0,
        button_status: Some(PanicStatus::Emergency),
    };

    let response = DeviceDetailsResponse::from(details);
    assert_eq!(response.button_status, "emergencia");
}

#[test]
fn test_device_serializes_legacy_field_names() {
    let device = Device::provisioned(Uuid::new_v4());
    let json = serde_json::to_value(&device).unwrap();

    assert_eq!(json["status"], "activo");
    assert_eq!(json["gps"]["latitud"], 0.0);
    assert_eq!(json["gps"]["longitud"], 0.0);
}

#[test]
fn test_panic_button_serializes_status_literal() {
    let button = PanicButton {
        id: Uuid::new_v4(),
        user_id: None,
        device_id: Uuid::new_v4(),
        status: PanicStatus::Emergency,
    };

    let json = serde_json::to_value(&button).unwrap();
    assert_eq!(json["status"], "emergencia");
    // Unset owner is omitted, not null
    assert!(json.get("user_id").is_none());
}

#[test]
fn test_route_serializes_legacy_location_keys() {
    let route = Route {
        id: Uuid::new_v4(),
        device_id: Uuid::new_v4(),
        name: "loop".to_string(),
        start_location: GeoPoint::new(10.0, 20.0),
        end_location: GeoPoint::origin(),
        start_date: Utc::now(),
        end_date: None,
    };

    let json = serde_json::to_value(&route).unwrap();
    assert_eq!(json["ubicacion_de_inicio"]["latitud"], 10.0);
    assert_eq!(json["ubicacion_de_final"]["latitud"], 0.0);
    assert!(json["end_date"].is_null());
}

#[test]
fn test_user_response_never_exposes_password_material() {
    let user = User::new(
        Uuid::new_v4(),
        "Ana".to_string(),
        "Torres".to_string(),
        "ana@example.com".to_string(),
        "$argon2id$v=19$secret".to_string(),
        UserRole::Admin,
    );

    let json = serde_json::to_value(UserResponse::from(user)).unwrap();
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["role"], "admin");
}
