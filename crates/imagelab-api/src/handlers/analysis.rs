//! Read-only analysis of uploads: histograms and regions of interest

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use imagelab_processing::{HistogramReport, Region, RoiKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct HistogramQuery {
    #[serde(default = "default_channel")]
    pub channel: String,
}

fn default_channel() -> String {
    "all".to_string()
}

#[derive(Debug, Deserialize)]
pub struct RoiRequest {
    pub filename: String,
    #[serde(rename = "type", default = "default_roi_type")]
    pub kind: String,
    /// Contour detection only; smaller regions are dropped.
    pub min_area: Option<f64>,
}

fn default_roi_type() -> String {
    "faces".to_string()
}

#[derive(Debug, Serialize)]
pub struct RoiResponse {
    pub regions: Vec<Region>,
    pub success: bool,
}

pub async fn histogram(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    Query(query): Query<HistogramQuery>,
) -> Result<Json<HistogramReport>, HttpAppError> {
    let report = state
        .processing
        .histogram(&filename, &query.channel)
        .await?;
    Ok(Json(report))
}

#[tracing::instrument(
    skip(state, request),
    fields(filename = %request.filename, kind = %request.kind)
)]
pub async fn detect_roi(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RoiRequest>,
) -> Result<Json<RoiResponse>, HttpAppError> {
    let kind = RoiKind::parse(&request.kind)?;
    let regions = state
        .processing
        .detect_regions(&request.filename, kind, request.min_area)
        .await?;

    Ok(Json(RoiResponse {
        regions,
        success: true,
    }))
}
