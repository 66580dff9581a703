//! Storage and service construction

use anyhow::{Context, Result};
use imagelab_core::Config;
use imagelab_processing::{FaceDetector, Gallery, ImageValidator, ProcessingService};
use imagelab_storage::LocalStorage;
use std::sync::Arc;

pub async fn initialize_services(config: &Config) -> Result<ProcessingService> {
    let uploads = LocalStorage::new(config.upload_dir.clone())
        .await
        .with_context(|| format!("Failed to open upload directory {}", config.upload_dir.display()))?;
    let processed = LocalStorage::new(config.processed_dir.clone())
        .await
        .with_context(|| {
            format!(
                "Failed to open processed directory {}",
                config.processed_dir.display()
            )
        })?;

    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        processed_dir = %config.processed_dir.display(),
        "Local storage initialized"
    );

    let gallery = Gallery::new(
        Arc::new(uploads),
        ImageValidator::from_config(config),
        config.max_files_per_upload,
    );

    let face_detector = setup_face_detector(config)?;

    Ok(ProcessingService::new(
        gallery,
        Arc::new(processed),
        face_detector,
    ))
}

#[cfg(feature = "face-detection")]
fn setup_face_detector(config: &Config) -> Result<Option<Arc<dyn FaceDetector>>> {
    let Some(path) = config.face_model_path.as_ref() else {
        tracing::warn!("FACE_MODEL_PATH not set, face detection requests will fail");
        return Ok(None);
    };

    let detector = imagelab_processing::CascadeFaceDetector::new(path.clone())
        .context("Failed to load face detection model")?;
    tracing::info!(model = %path.display(), "Face detection enabled");
    Ok(Some(Arc::new(detector)))
}

#[cfg(not(feature = "face-detection"))]
fn setup_face_detector(config: &Config) -> Result<Option<Arc<dyn FaceDetector>>> {
    if config.face_model_path.is_some() {
        tracing::warn!("FACE_MODEL_PATH set but face-detection feature not enabled");
    }
    Ok(None)
}
