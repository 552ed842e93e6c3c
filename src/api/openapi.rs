//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{
    auth_handler, device_handler, impact_handler, panic_handler, route_handler, user_handler,
};
use crate::domain::{
    Device, DeviceStatus, GeoPoint, Impact, PanicButton, PanicStatus, Route, UserResponse,
    UserRole,
};

/// OpenAPI documentation for the Fleettrack API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fleettrack API",
        version = "0.1.0",
        description = "Telemetry and incident-tracking backend for GPS-equipped field devices",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        // User endpoints
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::assign_device,
        user_handler::change_password,
        user_handler::delete_user,
        user_handler::delete_by_email,
        // Device endpoints
        device_handler::list_devices,
        device_handler::create_device,
        device_handler::get_device,
        device_handler::update_device,
        device_handler::delete_device,
        // Impact endpoints
        impact_handler::list_impacts,
        impact_handler::record_impact,
        impact_handler::list_severe_impacts,
        impact_handler::list_impacts_by_device,
        impact_handler::get_impact,
        impact_handler::update_impact,
        impact_handler::delete_impact,
        // Panic button endpoints
        panic_handler::get_button_by_device,
        panic_handler::create_button,
        panic_handler::activate_emergency,
        panic_handler::set_button_status,
        panic_handler::delete_button,
        // Route endpoints
        route_handler::list_routes,
        route_handler::open_route,
        route_handler::search_routes,
        route_handler::list_routes_by_device,
        route_handler::get_route,
        route_handler::update_route,
        route_handler::close_route,
        route_handler::delete_route,
    ),
    components(
        schemas(
            // Domain types
            GeoPoint,
            Device,
            DeviceStatus,
            Impact,
            PanicButton,
            PanicStatus,
            Route,
            UserRole,
            UserResponse,
            // Auth types
            auth_handler::LoginRequest,
            // User handler types
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            user_handler::AssignDeviceRequest,
            user_handler::ChangePasswordRequest,
            user_handler::DeleteByEmailRequest,
            // Device handler types
            device_handler::UpdateDeviceRequest,
            device_handler::DeviceDetailsResponse,
            // Impact handler types
            impact_handler::CreateImpactRequest,
            impact_handler::UpdateImpactRequest,
            // Panic button handler types
            panic_handler::CreatePanicButtonRequest,
            panic_handler::SetPanicStatusRequest,
            // Route handler types
            route_handler::OpenRouteRequest,
            route_handler::CloseRouteRequest,
            route_handler::UpdateRouteRequest,
        )
    ),
    tags(
        (name = "Authentication", description = "Credential verification"),
        (name = "Users", description = "User management operations"),
        (name = "Devices", description = "Device lifecycle operations"),
        (name = "Impacts", description = "Shock sensor readings"),
        (name = "Panic buttons", description = "Emergency-alert state machine"),
        (name = "Routes", description = "Trip recording")
    )
)]
pub struct ApiDoc;
