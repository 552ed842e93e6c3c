//! Route service - Enforces the open/close route protocol.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{GeoPoint, NewRoute, OpenRoute, Route, RouteUpdate};
use crate::errors::{AppError, AppResult};
use crate::infra::RouteRepository;

/// Route service trait for dependency injection.
#[async_trait]
pub trait RouteService: Send + Sync {
    /// Open a route; the start date defaults to now
    async fn open_route(&self, data: OpenRoute) -> AppResult<Route>;

    /// Finalize a route with its end location, stamping the end date now.
    /// Closing an already-closed route overwrites the end fields.
    async fn close_route(&self, id: Uuid, end_location: GeoPoint) -> AppResult<Route>;

    /// Get route by ID
    async fn get_route(&self, id: Uuid) -> AppResult<Route>;

    /// List all routes
    async fn list_routes(&self) -> AppResult<Vec<Route>>;

    /// List routes recorded by one device
    async fn list_by_device(&self, device_id: Uuid) -> AppResult<Vec<Route>>;

    /// Case-insensitive substring search over route names
    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Route>>;

    /// Update route details
    async fn update_route(&self, id: Uuid, changes: RouteUpdate) -> AppResult<Route>;

    /// Delete route by ID, returning the removed row
    async fn delete_route(&self, id: Uuid) -> AppResult<Route>;
}

/// Concrete implementation of RouteService using repository.
pub struct RouteManager {
    routes: Arc<dyn RouteRepository>,
}

impl RouteManager {
    /// Create new route service instance with repository
    pub fn new(routes: Arc<dyn RouteRepository>) -> Self {
        Self { routes }
    }
}

#[async_trait]
impl RouteService for RouteManager {
    async fn open_route(&self, data: OpenRoute) -> AppResult<Route> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Route name is required"));
        }

        self.routes
            .create(NewRoute {
                device_id: data.device_id,
                name: data.name,
                start_location: data.start_location,
                start_date: data.start_date.unwrap_or_else(Utc::now),
            })
            .await
    }

    async fn close_route(&self, id: Uuid, end_location: GeoPoint) -> AppResult<Route> {
        self.routes.close(id, end_location, Utc::now()).await
    }

    async fn get_route(&self, id: Uuid) -> AppResult<Route> {
        self.routes.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn list_routes(&self) -> AppResult<Vec<Route>> {
        self.routes.list().await
    }

    async fn list_by_device(&self, device_id: Uuid) -> AppResult<Vec<Route>> {
        self.routes.list_by_device(device_id).await
    }

    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Route>> {
        self.routes.search_by_name(fragment).await
    }

    async fn update_route(&self, id: Uuid, changes: RouteUpdate) -> AppResult<Route> {
        self.routes.update(id, changes).await
    }

    async fn delete_route(&self, id: Uuid) -> AppResult<Route> {
        self.routes.delete(id).await
    }
}
