//! Processing service
//!
//! Ties the gallery, the processed-output store and the pure image code together. All
//! decoding, transforming and encoding runs on the blocking thread pool so request
//! handlers never stall the async runtime.

use crate::analysis::histogram::{self, HistogramChannel, HistogramReport};
use crate::analysis::regions::{self, FaceDetector, Region};
use crate::archive::create_zip_archive;
use crate::codec::{decode, encode, encode_png, format_for_filename};
use crate::error::{ProcessingError, ProcessingResult};
use crate::gallery::{not_found_as, storage_key, Gallery};
use crate::image::color::grayscale;
use crate::image::dispatcher::{derived_filename, output_filename, Dispatcher};
use crate::image::params::OperationParams;
use crate::image::presets::{apply_preset, find_preset};
use image::DynamicImage;
use imagelab_core::constants::DEFAULT_MIN_REGION_AREA;
use imagelab_storage::{Storage, StorageError};
use std::sync::Arc;
use std::time::Instant;

/// Which region detector a ROI request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoiKind {
    Faces,
    Contours,
}

impl RoiKind {
    pub fn parse(name: &str) -> ProcessingResult<Self> {
        match name {
            "faces" | "face" => Ok(Self::Faces),
            "contours" | "contour" => Ok(Self::Contours),
            other => Err(ProcessingError::invalid_param(
                "type",
                format!("expected faces or contours, got '{}'", other),
            )),
        }
    }
}

/// Result of collecting processed files for a batch download.
#[derive(Debug)]
pub struct BatchArchive {
    /// ZIP bytes; `None` when none of the requested files exist.
    pub archive: Option<Vec<u8>>,
    pub included: Vec<String>,
    pub missing: Vec<String>,
}

async fn run_blocking<T, F>(f: F) -> ProcessingResult<T>
where
    F: FnOnce() -> ProcessingResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ProcessingError::Task(e.to_string()))?
}

#[derive(Clone)]
pub struct ProcessingService {
    gallery: Gallery,
    processed: Arc<dyn Storage>,
    dispatcher: Dispatcher,
    face_detector: Option<Arc<dyn FaceDetector>>,
}

impl ProcessingService {
    pub fn new(
        gallery: Gallery,
        processed: Arc<dyn Storage>,
        face_detector: Option<Arc<dyn FaceDetector>>,
    ) -> Self {
        Self {
            gallery,
            processed,
            dispatcher: Dispatcher::new(),
            face_detector,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn has_face_detector(&self) -> bool {
        self.face_detector.is_some()
    }

    async fn load_upload(&self, filename: &str) -> ProcessingResult<(String, Vec<u8>)> {
        let key = storage_key(filename)?;
        let data = self.gallery.read(&key).await?;
        Ok((key, data))
    }

    /// Apply one operation to an upload and persist the result.
    ///
    /// Single-channel results stay single-channel and the output is encoded in the
    /// input's format. Returns the output file name; an existing output of the same
    /// name is overwritten.
    #[tracing::instrument(skip(self, params))]
    pub async fn process(
        &self,
        filename: &str,
        operation: &str,
        params: OperationParams,
    ) -> ProcessingResult<String> {
        self.dispatcher.find(operation)?;
        let (key, data) = self.load_upload(filename).await?;
        let output = output_filename(&key, operation, &params)?;
        let format = format_for_filename(&output)?;

        let start = Instant::now();
        let dispatcher = self.dispatcher;
        let op = operation.to_string();
        let encoded = run_blocking(move || {
            let source = decode(&data)?.to_rgb8();
            let result = dispatcher.run(&source, &op, &params)?;
            encode(&result, format)
        })
        .await?;

        self.processed.put(&output, encoded).await?;

        tracing::info!(
            input = %key,
            output = %output,
            operation = %operation,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Operation applied"
        );

        Ok(output)
    }

    /// Apply one operation and return the result as PNG bytes without storing anything.
    #[tracing::instrument(skip(self, params))]
    pub async fn preview(
        &self,
        filename: &str,
        operation: &str,
        params: OperationParams,
    ) -> ProcessingResult<Vec<u8>> {
        self.dispatcher.find(operation)?;
        let (_, data) = self.load_upload(filename).await?;

        let dispatcher = self.dispatcher;
        let op = operation.to_string();
        run_blocking(move || {
            let source = decode(&data)?.to_rgb8();
            let result = dispatcher.apply(&source, &op, &params)?;
            encode_png(&DynamicImage::ImageRgb8(result))
        })
        .await
    }

    /// Run a preset on an upload and store `{stem}_preset_{preset}{ext}`.
    #[tracing::instrument(skip(self))]
    pub async fn apply_preset(&self, filename: &str, preset: &str) -> ProcessingResult<String> {
        find_preset(preset)?;
        let (key, data) = self.load_upload(filename).await?;
        let output = derived_filename(&key, &format!("preset_{}", preset))?;
        let format = format_for_filename(&output)?;

        let start = Instant::now();
        let dispatcher = self.dispatcher;
        let name = preset.to_string();
        let encoded = run_blocking(move || {
            let source = decode(&data)?.to_rgb8();
            let result = apply_preset(&dispatcher, &source, &name)?;
            encode(&DynamicImage::ImageRgb8(result), format)
        })
        .await?;

        self.processed.put(&output, encoded).await?;

        tracing::info!(
            input = %key,
            output = %output,
            preset = %preset,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Preset applied"
        );

        Ok(output)
    }

    pub async fn histogram(&self, filename: &str, channel: &str) -> ProcessingResult<HistogramReport> {
        let channel = HistogramChannel::parse(channel)?;
        let (_, data) = self.load_upload(filename).await?;
        run_blocking(move || Ok(histogram::generate(&decode(&data)?, channel))).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn detect_regions(
        &self,
        filename: &str,
        kind: RoiKind,
        min_area: Option<f64>,
    ) -> ProcessingResult<Vec<Region>> {
        let detector = match kind {
            RoiKind::Faces => Some(self.face_detector.clone().ok_or_else(|| {
                ProcessingError::DetectorUnavailable("no face model configured".to_string())
            })?),
            RoiKind::Contours => None,
        };
        let (_, data) = self.load_upload(filename).await?;
        let min_area = min_area.unwrap_or(DEFAULT_MIN_REGION_AREA);

        let found = run_blocking(move || {
            let source = decode(&data)?.to_rgb8();
            match detector {
                Some(detector) => detector.detect(&grayscale(&source)),
                None => Ok(regions::detect_contours(&source, min_area)),
            }
        })
        .await?;

        tracing::debug!(count = found.len(), "Regions detected");
        Ok(found)
    }

    pub async fn read_processed(&self, filename: &str) -> ProcessingResult<Vec<u8>> {
        let key = storage_key(filename)?;
        self.processed.get(&key).await.map_err(not_found_as(filename))
    }

    /// Package the requested processed files into one ZIP.
    ///
    /// Names are reduced to base names and blanks are dropped. Files that do not exist
    /// are reported in `missing` rather than failing the whole batch.
    pub async fn batch_archive(&self, names: &[String]) -> ProcessingResult<BatchArchive> {
        let mut entries = Vec::new();
        let mut included = Vec::new();
        let mut missing = Vec::new();

        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            let Ok(key) = storage_key(name) else {
                missing.push(name.to_string());
                continue;
            };
            match self.processed.get(&key).await {
                Ok(data) => {
                    included.push(key.clone());
                    entries.push((key, data));
                }
                Err(StorageError::NotFound(_)) => missing.push(key),
                Err(e) => return Err(e.into()),
            }
        }

        if entries.is_empty() {
            return Ok(BatchArchive {
                archive: None,
                included,
                missing,
            });
        }

        let archive = run_blocking(move || create_zip_archive(entries)).await?;
        tracing::info!(
            files = included.len(),
            missing = missing.len(),
            size_bytes = archive.len(),
            "Batch archive created"
        );

        Ok(BatchArchive {
            archive: Some(archive),
            included,
            missing,
        })
    }
}
