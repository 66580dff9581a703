//! Operation catalog, single-operation processing and previews

use crate::error::{HttpAppError, ValidatedJson};
use crate::handlers::image_response;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use imagelab_processing::{OperationInfo, OperationParams};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub filename: String,
    pub operation: String,
    #[serde(default)]
    pub parameters: OperationParams,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub message: String,
    pub input_file: String,
    pub output_file: String,
    pub operation: String,
    pub parameters: OperationParams,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub filename: String,
    pub operation: String,
    #[serde(default, alias = "parameters")]
    pub params: OperationParams,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// `data:image/png;base64,...` URL
    pub preview: String,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct OperationsResponse {
    pub operations: BTreeMap<&'static str, OperationInfo>,
}

pub async fn list_operations() -> Json<OperationsResponse> {
    Json(OperationsResponse {
        operations: imagelab_processing::list_operations(),
    })
}

/// Apply one operation to an upload and store the result under a derived name.
///
/// # Errors
/// - `AppError::NotFound` - the input file does not exist
/// - `AppError::UnknownOperation` / `AppError::InvalidParameter` - bad request
/// - `AppError::ImageProcessing` - the image could not be decoded or encoded
#[tracing::instrument(
    skip(state, request),
    fields(filename = %request.filename, operation = %request.operation)
)]
pub async fn process_image(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ProcessRequest>,
) -> Result<Json<ProcessResponse>, HttpAppError> {
    let output_file = state
        .processing
        .process(
            &request.filename,
            &request.operation,
            request.parameters.clone(),
        )
        .await?;

    Ok(Json(ProcessResponse {
        message: "Processing completed successfully".to_string(),
        input_file: request.filename,
        output_file,
        operation: request.operation,
        parameters: request.parameters,
    }))
}

/// Apply one operation in memory and return the result as a PNG data URL.
#[tracing::instrument(
    skip(state, request),
    fields(filename = %request.filename, operation = %request.operation)
)]
pub async fn preview_operation(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<PreviewRequest>,
) -> Result<Json<PreviewResponse>, HttpAppError> {
    let png = state
        .processing
        .preview(&request.filename, &request.operation, request.params)
        .await?;

    Ok(Json(PreviewResponse {
        preview: format!("data:image/png;base64,{}", STANDARD.encode(&png)),
        success: true,
    }))
}

/// Serve a processed output inline.
pub async fn get_processed(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    let data = state.processing.read_processed(&filename).await?;
    image_response(data, &filename, false)
}
