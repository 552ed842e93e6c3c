//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits for
//! dependency inversion and never cache state across calls: the store
//! is re-read on every operation.

pub mod container;
mod device_service;
mod impact_service;
mod panic_service;
mod route_service;
mod user_service;

// Service Container
pub use container::Services;

// Service traits and implementations
pub use device_service::{DeviceManager, DeviceService, ReconcileReport};
pub use impact_service::{ImpactManager, ImpactService};
pub use panic_service::{PanicManager, PanicService};
pub use route_service::{RouteManager, RouteService};
pub use user_service::{UserManager, UserService};
