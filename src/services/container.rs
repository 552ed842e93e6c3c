//! Service Container - Centralized service construction and access.
//!
//! Wires every manager to its repositories over one shared connection;
//! services are handed out as `Arc<dyn Trait>` for injection.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    DeviceManager, DeviceService, ImpactManager, ImpactService, PanicManager, PanicService,
    RouteManager, RouteService, UserManager, UserService,
};
use crate::infra::{DeviceStore, ImpactStore, PanicButtonStore, RouteStore, UserStore};

/// Concrete container holding all application services.
pub struct Services {
    user_service: Arc<dyn UserService>,
    device_service: Arc<dyn DeviceService>,
    route_service: Arc<dyn RouteService>,
    panic_service: Arc<dyn PanicService>,
    impact_service: Arc<dyn ImpactService>,
}

impl Services {
    /// Create service container from a database connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let devices = Arc::new(DeviceStore::new(db.clone()));
        let impacts = Arc::new(ImpactStore::new(db.clone()));
        let buttons = Arc::new(PanicButtonStore::new(db.clone()));
        let routes = Arc::new(RouteStore::new(db));

        Self {
            user_service: Arc::new(UserManager::new(users)),
            device_service: Arc::new(DeviceManager::new(
                devices,
                impacts.clone(),
                buttons.clone(),
            )),
            route_service: Arc::new(RouteManager::new(routes)),
            panic_service: Arc::new(PanicManager::new(buttons)),
            impact_service: Arc::new(ImpactManager::new(impacts)),
        }
    }

    /// Get user service
    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    /// Get device service
    pub fn devices(&self) -> Arc<dyn DeviceService> {
        self.device_service.clone()
    }

    /// Get route service
    pub fn routes(&self) -> Arc<dyn RouteService> {
        self.route_service.clone()
    }

    /// Get panic button service
    pub fn panic_buttons(&self) -> Arc<dyn PanicService> {
        self.panic_service.clone()
    }

    /// Get impact service
    pub fn impacts(&self) -> Arc<dyn ImpactService> {
        self.impact_service.clone()
    }
}
