use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use imagelab_processing::PresetInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ApplyPresetRequest {
    pub filename: String,
    pub preset: String,
}

#[derive(Debug, Serialize)]
pub struct ApplyPresetResponse {
    pub processed_image: String,
    pub success: bool,
}

/// Preset catalog keyed by preset id.
pub async fn list_presets() -> Json<BTreeMap<&'static str, PresetInfo>> {
    Json(imagelab_processing::list_presets())
}

#[tracing::instrument(
    skip(state, request),
    fields(filename = %request.filename, preset = %request.preset)
)]
pub async fn apply_preset(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ApplyPresetRequest>,
) -> Result<Json<ApplyPresetResponse>, HttpAppError> {
    let processed_image = state
        .processing
        .apply_preset(&request.filename, &request.preset)
        .await?;

    Ok(Json(ApplyPresetResponse {
        processed_image,
        success: true,
    }))
}
