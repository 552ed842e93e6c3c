//! Repair command - Reconciles partial device/panic-button states.
//!
//! Device provisioning and teardown are two sequential writes; a crash
//! between them leaves a device without a button or a button without a
//! device. This sweep provisions the missing buttons and purges the
//! orphans, and is safe to run repeatedly.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{DeviceService, Services};

/// Execute the repair command
pub async fn execute(config: Config) -> AppResult<()> {
    tracing::info!("Running panic button reconcile sweep...");

    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let services = Services::from_connection(db.get_connection());
    let report = services.devices().reconcile_panic_buttons().await?;

    println!(
        "provisioned: {}, purged: {}",
        report.provisioned, report.purged
    );
    tracing::info!("Reconcile sweep finished");

    Ok(())
}
