//! Route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{GeoPoint, OpenRoute, Route, RouteUpdate};
use crate::errors::AppResult;
use crate::services::RouteService;

/// Route opening request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OpenRouteRequest {
    /// Device recording the trip
    pub device_id: Uuid,
    /// Route name
    #[validate(length(min = 1, message = "Route name is required"))]
    #[schema(example = "morning loop")]
    pub name: String,
    /// Trip start position
    #[serde(rename = "ubicacion_de_inicio")]
    #[validate(nested)]
    pub start_location: GeoPoint,
    /// Trip start timestamp; defaults to now
    pub start_date: Option<DateTime<Utc>>,
}

/// Route finalize request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CloseRouteRequest {
    /// Trip end position
    #[serde(rename = "ubicacion_de_final")]
    #[validate(nested)]
    pub end_location: GeoPoint,
}

/// Route update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRouteRequest {
    /// New device reference
    pub device_id: Option<Uuid>,
    /// New route name
    #[validate(length(min = 1, message = "Route name cannot be empty"))]
    pub name: Option<String>,
    /// New start position
    #[serde(rename = "ubicacion_de_inicio")]
    #[validate(nested)]
    pub start_location: Option<GeoPoint>,
    /// New start timestamp
    pub start_date: Option<DateTime<Utc>>,
}

/// Query parameters for the route name search
#[derive(Debug, Deserialize, IntoParams)]
pub struct RouteSearchParams {
    /// Substring to match against route names (case-insensitive)
    pub name: String,
}

/// Create route routes
pub fn route_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(open_route))
        .route("/search", get(search_routes))
        .route("/device/:device_id", get(list_routes_by_device))
        .route("/:id", get(get_route).put(update_route).delete(delete_route))
        .route("/:id/close", patch(close_route))
}

/// List all routes
#[utoipa::path(
    get,
    path = "/routes",
    tag = "Routes",
    responses(
        (status = 200, description = "List of all routes", body = Vec<Route>)
    )
)]
pub async fn list_routes(State(state): State<AppState>) -> AppResult<Json<Vec<Route>>> {
    let routes = state.route_service.list_routes().await?;
    Ok(Json(routes))
}

/// Open a new route (no end date, placeholder end location)
#[utoipa::path(
    post,
    path = "/routes",
    tag = "Routes",
    request_body = OpenRouteRequest,
    responses(
        (status = 201, description = "Route opened", body = Route),
        (status = 400, description = "Validation error")
    )
)]
pub async fn open_route(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<OpenRouteRequest>,
) -> AppResult<(StatusCode, Json<Route>)> {
    let route = state
        .route_service
        .open_route(OpenRoute {
            device_id: payload.device_id,
            name: payload.name,
            start_location: payload.start_location,
            start_date: payload.start_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(route)))
}

/// Search routes by name fragment (case-insensitive)
#[utoipa::path(
    get,
    path = "/routes/search",
    tag = "Routes",
    params(RouteSearchParams),
    responses(
        (status = 200, description = "Matching routes", body = Vec<Route>)
    )
)]
pub async fn search_routes(
    State(state): State<AppState>,
    Query(params): Query<RouteSearchParams>,
) -> AppResult<Json<Vec<Route>>> {
    let routes = state.route_service.search_by_name(&params.name).await?;
    Ok(Json(routes))
}

/// List routes recorded by one device
#[utoipa::path(
    get,
    path = "/routes/device/{device_id}",
    tag = "Routes",
    params(("device_id" = Uuid, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Routes for the device", body = Vec<Route>)
    )
)]
pub async fn list_routes_by_device(
    State(state): State<AppState>,
    Path(device_id): Path<Uuid>,
) -> AppResult<Json<Vec<Route>>> {
    let routes = state.route_service.list_by_device(device_id).await?;
    Ok(Json(routes))
}

/// Get route by ID
#[utoipa::path(
    get,
    path = "/routes/{id}",
    tag = "Routes",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Route", body = Route),
        (status = 404, description = "Route not found")
    )
)]
pub async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Route>> {
    let route = state.route_service.get_route(id).await?;
    Ok(Json(route))
}

/// Update route details
#[utoipa::path(
    put,
    path = "/routes/{id}",
    tag = "Routes",
    params(("id" = Uuid, Path, description = "Route ID")),
    request_body = UpdateRouteRequest,
    responses(
        (status = 200, description = "Route updated", body = Route),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Route not found")
    )
)]
pub async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRouteRequest>,
) -> AppResult<Json<Route>> {
    let route = state
        .route_service
        .update_route(
            id,
            RouteUpdate {
                device_id: payload.device_id,
                name: payload.name,
                start_location: payload.start_location,
                start_date: payload.start_date,
            },
        )
        .await?;

    Ok(Json(route))
}

/// Finalize a route: write the end location and stamp the end date.
/// Re-closing overwrites the end fields.
#[utoipa::path(
    patch,
    path = "/routes/{id}/close",
    tag = "Routes",
    params(("id" = Uuid, Path, description = "Route ID")),
    request_body = CloseRouteRequest,
    responses(
        (status = 200, description = "Route closed", body = Route),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Route not found")
    )
)]
pub async fn close_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CloseRouteRequest>,
) -> AppResult<Json<Route>> {
    let route = state
        .route_service
        .close_route(id, payload.end_location)
        .await?;

    Ok(Json(route))
}

/// Delete route by ID
#[utoipa::path(
    delete,
    path = "/routes/{id}",
    tag = "Routes",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Route deleted", body = Route),
        (status = 404, description = "Route not found")
    )
)]
pub async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Route>> {
    let route = state.route_service.delete_route(id).await?;
    Ok(Json(route))
}
