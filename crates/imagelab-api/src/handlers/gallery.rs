//! Upload, listing, retrieval and deletion of gallery images

use crate::constants::UPLOAD_FIELD;
use crate::error::HttpAppError;
use crate::handlers::image_response;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use imagelab_core::{AppError, ImageInfo, StoredImage};
use imagelab_processing::UploadFailure;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub successful_uploads: Vec<StoredImage>,
    pub failed_uploads: Vec<UploadFailure>,
    pub total_uploaded: usize,
}

#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub images: Vec<StoredImage>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn multipart_error(err: MultipartError) -> HttpAppError {
    let app = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    };
    HttpAppError(app)
}

/// Upload one or more images in the repeated multipart field `files`.
///
/// Files are validated independently; rejected files are reported in
/// `failed_uploads` and never stop the rest of the batch.
///
/// # Errors
/// - `AppError::BadRequest` - no files, or a malformed multipart body
/// - `AppError::InvalidInput` - more files than `MAX_FILES_PER_UPLOAD`
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_images"))]
pub async fn upload_images(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let data = field.bytes().await.map_err(multipart_error)?;
        files.push((filename, data.to_vec()));
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("No files provided".to_string()).into());
    }

    let outcome = state.gallery().upload_batch(files).await?;
    let total_uploaded = outcome.successful.len();

    tracing::info!(
        uploaded = total_uploaded,
        failed = outcome.failed.len(),
        "Upload batch processed"
    );

    Ok(Json(UploadResponse {
        message: format!("{} file(s) uploaded successfully", total_uploaded),
        successful_uploads: outcome.successful,
        failed_uploads: outcome.failed,
        total_uploaded,
    }))
}

pub async fn list_gallery(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GalleryResponse>, HttpAppError> {
    let images = state.gallery().list().await?;
    Ok(Json(GalleryResponse {
        total: images.len(),
        images,
    }))
}

/// Serve an uploaded image inline.
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    let data = state.gallery().read(&filename).await?;
    image_response(data, &filename, false)
}

pub async fn image_info(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<ImageInfo>, HttpAppError> {
    Ok(Json(state.gallery().info(&filename).await?))
}

#[tracing::instrument(skip(state))]
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    if !state.gallery().delete(&filename).await? {
        return Err(AppError::NotFound(format!("File {} not found", filename)).into());
    }
    Ok(Json(MessageResponse {
        message: "Image deleted successfully".to_string(),
    }))
}
