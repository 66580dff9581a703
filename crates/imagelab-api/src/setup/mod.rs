//! Application setup and initialization
//!
//! Everything `main` needs to turn a [`Config`] into a served router lives here, so the
//! integration tests can build the exact same application against temporary directories.

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use imagelab_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config.environment);

    tracing::info!("Configuration loaded and validated successfully");

    let processing = services::initialize_services(&config).await?;
    let state = Arc::new(AppState::new(config, processing));

    let router = routes::setup_routes(state.clone())?;

    Ok((state, router))
}
