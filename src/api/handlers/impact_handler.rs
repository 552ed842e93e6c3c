//! Impact handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::DEFAULT_IMPACT_THRESHOLD;
use crate::domain::{Impact, ImpactUpdate, RecordImpact};
use crate::errors::AppResult;
use crate::services::ImpactService;

/// Impact recording request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateImpactRequest {
    /// Device that sensed the shock
    pub device_id: Uuid,
    /// Shock magnitude
    #[validate(range(min = 0.0, message = "Impact value must be non-negative"))]
    #[schema(example = 600.0)]
    pub value: f64,
    /// Reading timestamp; defaults to now
    pub impact_date: Option<DateTime<Utc>>,
}

/// Impact update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateImpactRequest {
    /// New device reference
    pub device_id: Option<Uuid>,
    /// New magnitude
    #[validate(range(min = 0.0, message = "Impact value must be non-negative"))]
    pub value: Option<f64>,
    /// New timestamp
    pub impact_date: Option<DateTime<Utc>>,
}

/// Query parameters for the severe-impacts listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct SevereParams {
    /// Strict lower bound on the magnitude; defaults to 512
    pub threshold: Option<f64>,
}

/// Create impact routes
pub fn impact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_impacts).post(record_impact))
        .route("/severe", get(list_severe_impacts))
        .route("/device/:device_id", get(list_impacts_by_device))
        .route(
            "/:id",
            get(get_impact).put(update_impact).delete(delete_impact),
        )
}

/// List all impacts
#[utoipa::path(
    get,
    path = "/impacts",
    tag = "Impacts",
    responses(
        (status = 200, description = "List of all impacts", body = Vec<Impact>)
    )
)]
pub async fn list_impacts(State(state): State<AppState>) -> AppResult<Json<Vec<Impact>>> {
    let impacts = state.impact_service.list_impacts().await?;
    Ok(Json(impacts))
}

/// Record an impact reading
#[utoipa::path(
    post,
    path = "/impacts",
    tag = "Impacts",
    request_body = CreateImpactRequest,
    responses(
        (status = 201, description = "Impact recorded", body = Impact),
        (status = 400, description = "Validation error")
    )
)]
pub async fn record_impact(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateImpactRequest>,
) -> AppResult<(StatusCode, Json<Impact>)> {
    let impact = state
        .impact_service
        .record_impact(RecordImpact {
            device_id: payload.device_id,
            value: payload.value,
            impact_date: payload.impact_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(impact)))
}

/// List impacts strictly above a magnitude threshold
#[utoipa::path(
    get,
    path = "/impacts/severe",
    tag = "Impacts",
    params(SevereParams),
    responses(
        (status = 200, description = "Impacts above the threshold", body = Vec<Impact>)
    )
)]
pub async fn list_severe_impacts(
    State(state): State<AppState>,
    Query(params): Query<SevereParams>,
) -> AppResult<Json<Vec<Impact>>> {
    let threshold = params.threshold.unwrap_or(DEFAULT_IMPACT_THRESHOLD);
    let impacts = state.impact_service.list_above_threshold(threshold).await?;
    Ok(Json(impacts))
}

/// List impacts recorded by one device
#[utoipa::path(
    get,
    path = "/impacts/device/{device_id}",
    tag = "Impacts",
    params(("device_id" = Uuid, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Impacts for the device", body = Vec<Impact>)
    )
)]
pub async fn list_impacts_by_device(
    State(state): State<AppState>,
    Path(device_id): Path<Uuid>,
) -> AppResult<Json<Vec<Impact>>> {
    let impacts = state.impact_service.list_by_device(device_id).await?;
    Ok(Json(impacts))
}

/// Get impact by ID
#[utoipa::path(
    get,
    path = "/impacts/{id}",
    tag = "Impacts",
    params(("id" = Uuid, Path, description = "Impact ID")),
    responses(
        (status = 200, description = "Impact", body = Impact),
        (status = 404, description = "Impact not found")
    )
)]
pub async fn get_impact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Impact>> {
    let impact = state.impact_service.get_impact(id).await?;
    Ok(Json(impact))
}

/// Update impact
#[utoipa::path(
    put,
    path = "/impacts/{id}",
    tag = "Impacts",
    params(("id" = Uuid, Path, description = "Impact ID")),
    request_body = UpdateImpactRequest,
    responses(
        (status = 200, description = "Impact updated", body = Impact),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Impact not found")
    )
)]
pub async fn update_impact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateImpactRequest>,
) -> AppResult<Json<Impact>> {
    let impact = state
        .impact_service
        .update_impact(
            id,
            ImpactUpdate {
                device_id: payload.device_id,
                value: payload.value,
                impact_date: payload.impact_date,
            },
        )
        .await?;

    Ok(Json(impact))
}

/// Delete impact by ID
#[utoipa::path(
    delete,
    path = "/impacts/{id}",
    tag = "Impacts",
    params(("id" = Uuid, Path, description = "Impact ID")),
    responses(
        (status = 200, description = "Impact deleted", body = Impact),
        (status = 404, description = "Impact not found")
    )
)]
pub async fn delete_impact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Impact>> {
    let impact = state.impact_service.delete_impact(id).await?;
    Ok(Json(impact))
}
