//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories over the tracking collections

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    DeviceRepository, DeviceStore, ImpactRepository, ImpactStore, PanicButtonRepository,
    PanicButtonStore, RouteRepository, RouteStore, UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockDeviceRepository, MockImpactRepository, MockPanicButtonRepository, MockRouteRepository,
    MockUserRepository,
};
