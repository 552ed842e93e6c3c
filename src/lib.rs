//! Fleettrack - Telemetry and incident tracking for field devices
//!
//! Backend for a fleet of GPS-equipped units carrying a shock sensor and a
//! panic button: device lifecycle (provisioning cascades to the panic
//! button), route open/close protocol, impact recording, and the panic
//! state machine, exposed over HTTP.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, repositories)
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Reconcile partial device/panic-button states
//! cargo run -- repair
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Device, GeoPoint, Impact, PanicButton, PanicStatus, Route, User};
pub use errors::{AppError, AppResult};
