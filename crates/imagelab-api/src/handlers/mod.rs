//! HTTP handlers, grouped by the part of the service they expose.

pub mod analysis;
pub mod download;
pub mod gallery;
pub mod index;
pub mod presets;
pub mod process;

use crate::error::HttpAppError;
use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use imagelab_core::AppError;
use imagelab_processing::codec::format_for_filename;

const OCTET_STREAM: &str = "application/octet-stream";

fn content_type_for(filename: &str) -> &'static str {
    format_for_filename(filename)
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}

/// Build a file response. `attachment` selects a download over inline display.
pub(crate) fn file_response(
    data: Vec<u8>,
    filename: &str,
    content_type: &str,
    attachment: bool,
) -> Result<Response, HttpAppError> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, data.len());

    if attachment {
        builder = builder.header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        );
    }

    builder.body(Body::from(data)).map_err(|e| {
        tracing::error!(error = %e, "Failed to build response");
        AppError::Internal(e.to_string()).into()
    })
}

/// Serve a stored image with the MIME type implied by its extension.
pub(crate) fn image_response(
    data: Vec<u8>,
    filename: &str,
    attachment: bool,
) -> Result<Response, HttpAppError> {
    file_response(data, filename, content_type_for(filename), attachment)
}
