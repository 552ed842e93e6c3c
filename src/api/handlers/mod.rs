//! HTTP request handlers.

pub mod auth_handler;
pub mod device_handler;
pub mod impact_handler;
pub mod panic_handler;
pub mod route_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use device_handler::device_routes;
pub use impact_handler::impact_routes;
pub use panic_handler::panic_button_routes;
pub use route_handler::route_routes;
pub use user_handler::user_routes;
