//! Panic button handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{is_valid_panic_status, CreatePanicButton, PanicButton, PanicStatus};
use crate::errors::{AppError, AppResult};
use crate::services::PanicService;

/// Standalone panic button creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePanicButtonRequest {
    /// Device the button is attached to
    pub device_id: Uuid,
    /// Owner of the button, if already known
    pub user_id: Option<Uuid>,
    /// Initial status literal; defaults to "inactivo"
    #[schema(example = "inactivo")]
    pub status: Option<String>,
}

/// Status override request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetPanicStatusRequest {
    /// Status literal ("activo", "inactivo" or "emergencia")
    #[schema(example = "inactivo")]
    pub status: String,
}

/// Create panic button routes
pub fn panic_button_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_button))
        .route("/:id", delete(delete_button))
        .route(
            "/device/:device_id",
            get(get_button_by_device).patch(set_button_status),
        )
        .route("/device/:device_id/activate", patch(activate_emergency))
}

fn parse_status(status: &str) -> AppResult<PanicStatus> {
    if !is_valid_panic_status(status) {
        return Err(AppError::validation(
            "Invalid status. Must be 'activo', 'inactivo' or 'emergencia'",
        ));
    }
    Ok(PanicStatus::from(status))
}

/// Get the panic button attached to a device
#[utoipa::path(
    get,
    path = "/panic-buttons/device/{device_id}",
    tag = "Panic buttons",
    params(("device_id" = Uuid, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Panic button", body = PanicButton),
        (status = 404, description = "Panic button not found")
    )
)]
pub async fn get_button_by_device(
    State(state): State<AppState>,
    Path(device_id): Path<Uuid>,
) -> AppResult<Json<PanicButton>> {
    let button = state.panic_service.get_by_device(device_id).await?;
    Ok(Json(button))
}

/// Create a standalone panic button
#[utoipa::path(
    post,
    path = "/panic-buttons",
    tag = "Panic buttons",
    request_body = CreatePanicButtonRequest,
    responses(
        (status = 201, description = "Panic button created", body = PanicButton),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Device already holds a panic button")
    )
)]
pub async fn create_button(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePanicButtonRequest>,
) -> AppResult<(StatusCode, Json<PanicButton>)> {
    let status = payload.status.as_deref().map(parse_status).transpose()?;

    let button = state
        .panic_service
        .create_button(CreatePanicButton {
            device_id: payload.device_id,
            user_id: payload.user_id,
            status,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(button)))
}

/// Remote emergency activation: force the button to "emergencia"
/// regardless of its current state
#[utoipa::path(
    patch,
    path = "/panic-buttons/device/{device_id}/activate",
    tag = "Panic buttons",
    params(("device_id" = Uuid, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Panic button forced to emergency", body = PanicButton),
        (status = 404, description = "Panic button not found")
    )
)]
pub async fn activate_emergency(
    State(state): State<AppState>,
    Path(device_id): Path<Uuid>,
) -> AppResult<Json<PanicButton>> {
    let button = state.panic_service.activate_emergency(device_id).await?;
    Ok(Json(button))
}

/// Operator override of the button status
#[utoipa::path(
    patch,
    path = "/panic-buttons/device/{device_id}",
    tag = "Panic buttons",
    params(("device_id" = Uuid, Path, description = "Device ID")),
    request_body = SetPanicStatusRequest,
    responses(
        (status = 200, description = "Panic button status updated", body = PanicButton),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Panic button not found")
    )
)]
pub async fn set_button_status(
    State(state): State<AppState>,
    Path(device_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SetPanicStatusRequest>,
) -> AppResult<Json<PanicButton>> {
    let status = parse_status(&payload.status)?;
    let button = state.panic_service.set_status(device_id, status).await?;
    Ok(Json(button))
}

/// Delete panic button by ID
#[utoipa::path(
    delete,
    path = "/panic-buttons/{id}",
    tag = "Panic buttons",
    params(("id" = Uuid, Path, description = "Panic button ID")),
    responses(
        (status = 200, description = "Panic button deleted", body = PanicButton),
        (status = 404, description = "Panic button not found")
    )
)]
pub async fn delete_button(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PanicButton>> {
    let button = state.panic_service.delete_button(id).await?;
    Ok(Json(button))
}
