//! Attachment downloads of processed outputs

use crate::constants::{BATCH_ARCHIVE_NAME, MISSING_FILES_HEADER};
use crate::error::HttpAppError;
use crate::handlers::{file_response, image_response};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use imagelab_core::AppError;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    /// Comma-separated processed file names.
    pub files: Option<String>,
}

pub async fn download_single(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    let data = state.processing.read_processed(&filename).await?;
    image_response(data, &filename, true)
}

/// Bundle processed outputs into `images.zip`.
///
/// Unknown names do not fail the request as long as one file is found; they are
/// listed in the `X-Missing-Files` header instead.
#[tracing::instrument(skip(state, query))]
pub async fn download_batch(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BatchQuery>,
) -> Result<Response, HttpAppError> {
    let Some(files) = query.files.filter(|f| !f.trim().is_empty()) else {
        return Err(AppError::BadRequest(
            "No files specified. Use ?files=file1.jpg,file2.jpg".to_string(),
        )
        .into());
    };

    let names: Vec<String> = files
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect();
    if names.is_empty() {
        return Err(AppError::BadRequest("No valid files specified".to_string()).into());
    }

    let batch = state.processing.batch_archive(&names).await?;

    let Some(archive) = batch.archive else {
        tracing::debug!(missing = ?batch.missing, "No requested files found");
        let body = json!({
            "error": "None of the requested files were found",
            "code": "NOT_FOUND",
            "missing": batch.missing,
        });
        return Ok((StatusCode::NOT_FOUND, Json(body)).into_response());
    };

    let mut response = file_response(archive, BATCH_ARCHIVE_NAME, "application/zip", true)?;
    if !batch.missing.is_empty() {
        match HeaderValue::from_str(&batch.missing.join(",")) {
            Ok(value) => {
                response.headers_mut().insert(MISSING_FILES_HEADER, value);
            }
            Err(e) => tracing::warn!(error = %e, "Missing file names not representable as a header"),
        }
    }

    Ok(response)
}
