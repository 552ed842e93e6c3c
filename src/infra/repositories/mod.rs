//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;

mod device_repository;
mod impact_repository;
mod panic_button_repository;
mod route_repository;
mod user_repository;

pub use device_repository::{DeviceRepository, DeviceStore};
pub use impact_repository::{ImpactRepository, ImpactStore};
pub use panic_button_repository::{PanicButtonRepository, PanicButtonStore};
pub use route_repository::{RouteRepository, RouteStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use device_repository::MockDeviceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use impact_repository::MockImpactRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use panic_button_repository::MockPanicButtonRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use route_repository::MockRouteRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
