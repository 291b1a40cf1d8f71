//! Application wiring: configuration validation, telemetry, backend
//! construction, and the HTTP server lifecycle.

pub mod routes;
pub mod server;
pub mod services;
pub mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use darkroom_core::Config;

use crate::state::AppState;

/// Initialize the application: validate configuration, start telemetry,
/// build backends and services, and assemble the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    // Fail fast on bad configuration before touching any backend.
    config.validate().context("Invalid configuration")?;

    telemetry::init_telemetry(&config);

    tracing::info!(
        environment = %config.environment,
        storage_backend = %config.storage_backend,
        catalog_backend = %config.catalog_backend,
        max_upload_size_mb = config.max_upload_size_mb(),
        "Starting Darkroom API"
    );

    let state = services::initialize_services(config).await?;
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
