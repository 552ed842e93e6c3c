//! Application route configuration.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    auth_routes, device_routes, impact_routes, panic_button_routes, route_routes, user_routes,
};
use super::openapi::ApiDoc;
use super::AppState;
use crate::services::{DeviceService, UserService};

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Entity surfaces
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/devices", device_routes())
        .nest("/impacts", impact_routes())
        .nest("/panic-buttons", panic_button_routes())
        .nest("/routes", route_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to the Fleettrack API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
    /// Registered user count, absent when the store is unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    users: Option<u64>,
    /// Provisioned device count, absent when the store is unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    devices: Option<u64>,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check and row counts
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_status = match state.database.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    };

    let healthy = db_status.status == "healthy";

    let users = state.user_service.count_users().await.ok();
    let devices = state.device_service.count_devices().await.ok();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        database: db_status,
        users,
        devices,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
