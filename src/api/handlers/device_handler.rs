//! Device handlers.
//!
//! The device surface wraps its payloads in the success envelope that
//! existing consumers of the fleet API expect.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::PANIC_STATUS_MISSING;
use crate::domain::{
    is_valid_device_status, Device, DeviceDetails, DeviceStatus, DeviceUpdate, GeoPoint,
};
use crate::errors::{AppError, AppResult};
use crate::services::DeviceService;
use crate::types::ApiResponse;

/// Device update request (full replacement of the mutable fields)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDeviceRequest {
    /// Reported position
    #[validate(nested)]
    pub gps: GeoPoint,
    /// Timestamp of the report
    pub last_update_date: DateTime<Utc>,
    /// Clock string reported by the unit
    #[schema(example = "14:35:00")]
    pub last_update_time: String,
    /// Device status literal ("activo" or "inactivo")
    #[schema(example = "activo")]
    pub status: String,
}

/// Device detail payload: the device plus its incident context
#[derive(Debug, Serialize, ToSchema)]
pub struct DeviceDetailsResponse {
    pub id: Uuid,
    pub gps: GeoPoint,
    pub last_update_date: DateTime<Utc>,
    pub last_update_time: String,
    pub status: DeviceStatus,
    /// Number of impacts recorded by this device
    pub impacts: u64,
    /// Panic button status literal, or "no existe" when the button row is
    /// missing
    #[schema(example = "inactivo")]
    pub button_status: String,
}

impl From<DeviceDetails> for DeviceDetailsResponse {
    fn from(details: DeviceDetails) -> Self {
        Self {
            id: details.device.id,
            gps: details.device.gps,
            last_update_date: details.device.last_update_date,
            last_update_time: details.device.last_update_time,
            status: details.device.status,
            impacts: details.impacts,
            button_status: details
                .button_status
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| PANIC_STATUS_MISSING.to_string()),
        }
    }
}

/// Create device routes
pub fn device_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_devices).post(create_device))
        .route(
            "/:id",
            get(get_device).put(update_device).delete(delete_device),
        )
}

/// List all devices
#[utoipa::path(
    get,
    path = "/devices",
    tag = "Devices",
    responses(
        (status = 200, description = "List of all devices", body = Vec<Device>)
    )
)]
pub async fn list_devices(State(state): State<AppState>) -> AppResult<Json<Vec<Device>>> {
    let devices = state.device_service.list_devices().await?;
    Ok(Json(devices))
}

/// Provision a new device together with its panic button
#[utoipa::path(
    post,
    path = "/devices",
    tag = "Devices",
    responses(
        (status = 201, description = "Device provisioned"),
        (status = 500, description = "Device created without its panic button (partial failure)")
    )
)]
pub async fn create_device(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<Device>>)> {
    let device = state.device_service.create_device().await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(device))))
}

/// Get a device with its impact count and panic button status
#[utoipa::path(
    get,
    path = "/devices/{id}",
    tag = "Devices",
    params(("id" = Uuid, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Device detail"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DeviceDetailsResponse>>> {
    let details = state.device_service.get_device(id).await?;
    Ok(Json(ApiResponse::success(DeviceDetailsResponse::from(
        details,
    ))))
}

/// Update a device (full replacement of the mutable fields)
#[utoipa::path(
    put,
    path = "/devices/{id}",
    tag = "Devices",
    params(("id" = Uuid, Path, description = "Device ID")),
    request_body = UpdateDeviceRequest,
    responses(
        (status = 200, description = "Device updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn update_device(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDeviceRequest>,
) -> AppResult<Json<ApiResponse<Device>>> {
    if !is_valid_device_status(&payload.status) {
        return Err(AppError::validation(
            "Invalid status. Must be 'activo' or 'inactivo'",
        ));
    }

    let device = state
        .device_service
        .update_device(
            id,
            DeviceUpdate {
                gps: payload.gps,
                last_update_date: payload.last_update_date,
                last_update_time: payload.last_update_time,
                status: DeviceStatus::from(payload.status.as_str()),
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(device)))
}

/// Tear down a device and its panic button
#[utoipa::path(
    delete,
    path = "/devices/{id}",
    tag = "Devices",
    params(("id" = Uuid, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Device deleted"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn delete_device(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Device>>> {
    let device = state.device_service.delete_device(id).await?;
    Ok(Json(ApiResponse::with_message(
        device,
        "Device deleted successfully",
    )))
}
