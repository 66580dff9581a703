//! Route configuration and setup

mod health;

use crate::constants::{API_PREFIX, MISSING_FILES_HEADER};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use imagelab_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and headers on top of the file payloads.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

const DEFAULT_CONCURRENCY_LIMIT: usize = 256;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let config = state.config.clone();
    let cors = setup_cors(&config)?;

    let body_limit = config
        .max_file_size_bytes
        .saturating_mul(config.max_files_per_upload)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    tracing::info!(body_limit_bytes = body_limit, "Request body limit configured");

    // Caps in-flight requests; each one may hold several decoded images in memory
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_CONCURRENCY_LIMIT)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = Router::new()
        .route("/", get(handlers::index::index))
        .route("/health", get(health::health_check))
        .nest(API_PREFIX, api_routes())
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Gallery
        .route("/upload", post(handlers::gallery::upload_images))
        .route("/gallery", get(handlers::gallery::list_gallery))
        .route(
            "/image/{filename}",
            get(handlers::gallery::get_image).delete(handlers::gallery::delete_image),
        )
        .route("/image/{filename}/info", get(handlers::gallery::image_info))
        // Operations
        .route("/operations", get(handlers::process::list_operations))
        .route("/process", post(handlers::process::process_image))
        .route("/preview", post(handlers::process::preview_operation))
        .route("/processed/{filename}", get(handlers::process::get_processed))
        // Presets
        .route("/presets", get(handlers::presets::list_presets))
        .route("/preset/apply", post(handlers::presets::apply_preset))
        // Analysis
        .route("/histogram/{filename}", get(handlers::analysis::histogram))
        .route("/roi/detect", post(handlers::analysis::detect_roi))
        // Downloads
        .route(
            "/download/single/{filename}",
            get(handlers::download::download_single),
        )
        .route("/download/batch", get(handlers::download::download_batch))
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
            .expose_headers([HeaderName::from_static(MISSING_FILES_HEADER)])
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
            .expose_headers([HeaderName::from_static(MISSING_FILES_HEADER)])
    };
    Ok(cors)
}
