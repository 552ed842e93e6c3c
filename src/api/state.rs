//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and the
//! database handle used by the health check.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    DeviceService, ImpactService, PanicService, RouteService, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Device lifecycle service
    pub device_service: Arc<dyn DeviceService>,
    /// Route lifecycle service
    pub route_service: Arc<dyn RouteService>,
    /// Panic button service
    pub panic_service: Arc<dyn PanicService>,
    /// Impact recorder service
    pub impact_service: Arc<dyn ImpactService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection.
    ///
    /// This is the recommended way to create AppState as it wires every
    /// service through the service container.
    pub fn from_config(database: Arc<Database>) -> Self {
        let services = Services::from_connection(database.get_connection());

        Self {
            user_service: services.users(),
            device_service: services.devices(),
            route_service: services.routes(),
            panic_service: services.panic_buttons(),
            impact_service: services.impacts(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        device_service: Arc<dyn DeviceService>,
        route_service: Arc<dyn RouteService>,
        panic_service: Arc<dyn PanicService>,
        impact_service: Arc<dyn ImpactService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            user_service,
            device_service,
            route_service,
            panic_service,
            impact_service,
            database,
        }
    }
}
