//! Route repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::route::{self, ActiveModel, Entity as RouteEntity};
use crate::domain::{GeoPoint, NewRoute, Route, RouteUpdate};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Route repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Persist a new route in the open state (no end date, placeholder end
    /// location)
    async fn create(&self, data: NewRoute) -> AppResult<Route>;

    /// Find route by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>>;

    /// List all routes
    async fn list(&self) -> AppResult<Vec<Route>>;

    /// List routes recorded by one device
    async fn list_by_device(&self, device_id: Uuid) -> AppResult<Vec<Route>>;

    /// Case-insensitive substring search over route names
    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Route>>;

    /// Apply a per-field optional edit
    async fn update(&self, id: Uuid, changes: RouteUpdate) -> AppResult<Route>;

    /// Write the end location and end date (finalize)
    async fn close(
        &self,
        id: Uuid,
        end_location: GeoPoint,
        end_date: DateTime<Utc>,
    ) -> AppResult<Route>;

    /// Delete route by ID, returning the removed row
    async fn delete(&self, id: Uuid) -> AppResult<Route>;
}

/// Concrete implementation of RouteRepository backed by SeaORM
pub struct RouteStore {
    db: DatabaseConnection,
}

impl RouteStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RouteRepository for RouteStore {
    async fn create(&self, data: NewRoute) -> AppResult<Route> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            device_id: Set(data.device_id),
            name: Set(data.name),
            start_location: Set(data.start_location.into()),
            end_location: Set(GeoPoint::origin().into()),
            start_date: Set(data.start_date),
            end_date: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Route::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        let result = RouteEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Route::from))
    }

    async fn list(&self) -> AppResult<Vec<Route>> {
        let models = RouteEntity::find()
            .order_by_asc(route::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Route::from).collect())
    }

    async fn list_by_device(&self, device_id: Uuid) -> AppResult<Vec<Route>> {
        let models = RouteEntity::find()
            .filter(route::Column::DeviceId.eq(device_id))
            .order_by_asc(route::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Route::from).collect())
    }

    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Route>> {
        let pattern = format!("%{}%", fragment.to_lowercase());
        let models = RouteEntity::find()
            .filter(Expr::expr(Func::lower(Expr::col(route::Column::Name))).like(pattern))
            .order_by_asc(route::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Route::from).collect())
    }

    async fn update(&self, id: Uuid, changes: RouteUpdate) -> AppResult<Route> {
        let route = RouteEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = route.into();

        if let Some(device_id) = changes.device_id {
            active.device_id = Set(device_id);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(start_location) = changes.start_location {
            active.start_location = Set(start_location.into());
        }
        if let Some(start_date) = changes.start_date {
            active.start_date = Set(start_date);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Route::from(model))
    }

    async fn close(
        &self,
        id: Uuid,
        end_location: GeoPoint,
        end_date: DateTime<Utc>,
    ) -> AppResult<Route> {
        let route = RouteEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = route.into();
        active.end_location = Set(end_location.into());
        active.end_date = Set(Some(end_date));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Route::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Route> {
        let model = RouteEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let route = Route::from(model.clone());
        model.delete(&self.db).await.map_err(AppError::from)?;
        Ok(route)
    }
}
