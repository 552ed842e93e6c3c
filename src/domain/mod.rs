//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod device;
pub mod geo;
pub mod impact;
pub mod panic_button;
pub mod password;
pub mod route;
pub mod user;

pub use device::{is_valid_device_status, Device, DeviceDetails, DeviceStatus, DeviceUpdate};
pub use geo::GeoPoint;
pub use impact::{Impact, ImpactUpdate, NewImpact, RecordImpact};
pub use panic_button::{
    is_valid_panic_status, CreatePanicButton, NewPanicButton, PanicButton, PanicStatus,
};
pub use password::Password;
pub use route::{NewRoute, OpenRoute, Route, RouteUpdate};
pub use user::{
    is_valid_role, CreateUser, NewUser, UpdateUser, User, UserChanges, UserResponse, UserRole,
};
