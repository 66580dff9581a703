//! Health check handler and response type.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

async fn check_dir(path: PathBuf) -> Result<(), std::io::Error> {
    let metadata = tokio::fs::metadata(&path).await?;
    if metadata.is_dir() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("{} is not a directory", path.display())))
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub uploads: String,
    pub processed: String,
    pub face_detection: bool,
}

/// Both storage directories must be reachable for the service to report healthy.
pub(super) async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let uploads = run_check(
        TIMEOUT,
        check_dir(state.config.upload_dir.clone()),
        "unhealthy",
    )
    .await;
    let processed = run_check(
        TIMEOUT,
        check_dir(state.config.processed_dir.clone()),
        "unhealthy",
    )
    .await;

    let healthy = uploads == "healthy" && processed == "healthy";
    if !healthy {
        tracing::error!(uploads = %uploads, processed = %processed, "Health check failed");
    }

    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        uploads,
        processed,
        face_detection: state.processing.has_face_detector(),
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
