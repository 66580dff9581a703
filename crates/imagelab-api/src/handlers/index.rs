use crate::constants::API_VERSION;
use axum::Json;
use serde_json::{json, Value};

/// Service banner with a map of the available endpoints.
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Image laboratory API",
        "version": API_VERSION,
        "endpoints": {
            "upload": "POST /api/upload",
            "gallery": "GET /api/gallery",
            "image": "GET|DELETE /api/image/{filename}",
            "image_info": "GET /api/image/{filename}/info",
            "operations": "GET /api/operations",
            "process": "POST /api/process",
            "preview": "POST /api/preview",
            "processed": "GET /api/processed/{filename}",
            "presets": "GET /api/presets",
            "apply_preset": "POST /api/preset/apply",
            "histogram": "GET /api/histogram/{filename}?channel=all|gray|r|g|b",
            "roi": "POST /api/roi/detect",
            "download_single": "GET /api/download/single/{filename}",
            "download_batch": "GET /api/download/batch?files=a.png,b.png",
            "health": "GET /health"
        }
    }))
}
