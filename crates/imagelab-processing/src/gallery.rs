//! Gallery of uploaded images
//!
//! Uploads are validated, renamed to `{stem}_{8 hex chars}{ext}` so concurrent uploads
//! of the same name never collide, and written to the uploads store. Listing re-reads
//! metadata from the files every time; nothing is cached between requests.

use crate::error::{ProcessingError, ProcessingResult};
use crate::metadata::extract_metadata;
use crate::validator::ImageValidator;
use chrono::Utc;
use imagelab_core::{ImageInfo, StoredImage};
use imagelab_storage::{sanitize_filename, Storage, StorageError};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// One rejected file of a batch upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadFailure {
    pub filename: String,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadOutcome {
    pub successful: Vec<StoredImage>,
    pub failed: Vec<UploadFailure>,
}

/// Reduce a client-supplied name to a storage key.
pub fn storage_key(name: &str) -> ProcessingResult<String> {
    sanitize_filename(name).ok_or_else(|| ProcessingError::InvalidFilename(name.to_string()))
}

/// Map a missing object to `NotFound` under the name the client asked for.
pub(crate) fn not_found_as(name: &str) -> impl FnOnce(StorageError) -> ProcessingError + '_ {
    move |e| match e {
        StorageError::NotFound(_) => ProcessingError::NotFound(name.to_string()),
        other => ProcessingError::Storage(other),
    }
}

fn unique_name(original: &str) -> ProcessingResult<String> {
    let base = storage_key(original)?;
    let path = Path::new(&base);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ProcessingError::InvalidFilename(original.to_string()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    let id = Uuid::new_v4().simple().to_string();
    Ok(format!("{}_{}{}", stem, &id[..8], ext))
}

#[derive(Clone)]
pub struct Gallery {
    uploads: Arc<dyn Storage>,
    validator: ImageValidator,
    max_files_per_upload: usize,
}

impl Gallery {
    pub fn new(
        uploads: Arc<dyn Storage>,
        validator: ImageValidator,
        max_files_per_upload: usize,
    ) -> Self {
        Self {
            uploads,
            validator,
            max_files_per_upload,
        }
    }

    /// Store already-validated bytes under a fresh unique name.
    #[tracing::instrument(skip(self, data), fields(size_bytes = data.len()))]
    pub async fn save(&self, original_filename: &str, data: Vec<u8>) -> ProcessingResult<StoredImage> {
        let filename = unique_name(original_filename)?;
        let metadata = extract_metadata(&data)?;

        self.uploads.put(&filename, data).await?;

        tracing::info!(
            filename = %filename,
            width = metadata.width,
            height = metadata.height,
            format = %metadata.format,
            "Image saved"
        );

        Ok(StoredImage {
            filename,
            original_filename: Some(original_filename.to_string()),
            metadata,
            upload_time: Utc::now(),
        })
    }

    /// Validate and save each file independently.
    ///
    /// A batch over the per-request limit is rejected whole. Otherwise every file ends
    /// up in exactly one of `successful` or `failed`; earlier saves are never rolled back.
    pub async fn upload_batch(
        &self,
        files: Vec<(String, Vec<u8>)>,
    ) -> ProcessingResult<UploadOutcome> {
        if files.len() > self.max_files_per_upload {
            return Err(ProcessingError::TooManyFiles {
                count: files.len(),
                max: self.max_files_per_upload,
            });
        }

        let mut outcome = UploadOutcome::default();

        for (filename, data) in files {
            let validator = self.validator.clone();
            let (data, report) = {
                let name = filename.clone();
                tokio::task::spawn_blocking(move || {
                    let report = validator.validate(&name, &data);
                    (data, report)
                })
                .await
                .map_err(|e| ProcessingError::Task(e.to_string()))?
            };

            if !report.is_ok() {
                tracing::warn!(filename = %filename, errors = ?report.messages(), "Upload rejected");
                outcome.failed.push(UploadFailure {
                    filename,
                    errors: report.messages(),
                });
                continue;
            }

            match self.save(&filename, data).await {
                Ok(stored) => outcome.successful.push(stored),
                Err(e) => {
                    tracing::error!(filename = %filename, error = %e, "Failed to save upload");
                    outcome.failed.push(UploadFailure {
                        filename,
                        errors: vec![e.to_string()],
                    });
                }
            }
        }

        Ok(outcome)
    }

    /// Every readable image in the store, newest first.
    pub async fn list(&self) -> ProcessingResult<Vec<StoredImage>> {
        let mut objects = self.uploads.list().await?;
        objects.retain(|o| self.validator.has_allowed_extension(&o.key));
        objects.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.key.cmp(&b.key)));

        let mut images = Vec::with_capacity(objects.len());
        for object in objects {
            let data = match self.uploads.get(&object.key).await {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(filename = %object.key, error = %e, "Skipping unreadable file");
                    continue;
                }
            };
            match extract_metadata(&data) {
                Ok(metadata) => images.push(StoredImage {
                    filename: object.key,
                    original_filename: None,
                    metadata,
                    upload_time: object.modified,
                }),
                Err(e) => {
                    tracing::warn!(filename = %object.key, error = %e, "Skipping file without readable metadata");
                }
            }
        }

        Ok(images)
    }

    pub async fn read(&self, filename: &str) -> ProcessingResult<Vec<u8>> {
        let key = storage_key(filename)?;
        self.uploads.get(&key).await.map_err(not_found_as(filename))
    }

    pub async fn info(&self, filename: &str) -> ProcessingResult<ImageInfo> {
        let key = storage_key(filename)?;
        let object = self.uploads.stat(&key).await.map_err(not_found_as(filename))?;
        let data = self.uploads.get(&key).await.map_err(not_found_as(filename))?;
        let metadata = extract_metadata(&data)?;

        Ok(ImageInfo::from(StoredImage {
            filename: key,
            original_filename: None,
            metadata,
            upload_time: object.modified,
        }))
    }

    /// Remove an upload. Returns whether it existed.
    pub async fn delete(&self, filename: &str) -> ProcessingResult<bool> {
        let key = storage_key(filename)?;
        let deleted = self.uploads.delete(&key).await?;
        if deleted {
            tracing::info!(filename = %key, "Image deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use imagelab_core::Config;
    use imagelab_storage::LocalStorage;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([255, 0, 0]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    async fn gallery(max_files: usize) -> (TempDir, Gallery) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("uploads")).await.unwrap();
        let validator = ImageValidator::from_config(&Config::default());
        (dir, Gallery::new(Arc::new(storage), validator, max_files))
    }

    #[test]
    fn test_unique_name_shape() {
        let name = unique_name("photo.png").unwrap();
        assert!(name.starts_with("photo_"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "photo_".len() + 8 + ".png".len());
        assert_ne!(unique_name("photo.png").unwrap(), name);
    }

    #[test]
    fn test_storage_key_rejects_empty_names() {
        assert!(storage_key("..").is_err());
        assert_eq!(storage_key("../../secret.png").unwrap(), "secret.png");
    }

    #[tokio::test]
    async fn test_upload_then_list() {
        let (_dir, gallery) = gallery(10).await;
        let outcome = gallery
            .upload_batch(vec![("red.png".to_string(), png(100, 100))])
            .await
            .unwrap();
        assert_eq!(outcome.successful.len(), 1);
        assert!(outcome.failed.is_empty());

        let images = gallery.list().await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].filename, outcome.successful[0].filename);
        assert_eq!(images[0].metadata.width, 100);
        assert_eq!(images[0].metadata.format, "PNG");
        assert_eq!(images[0].metadata.mode, "RGB");
    }

    #[tokio::test]
    async fn test_batch_keeps_good_files_and_reports_bad_ones() {
        let (_dir, gallery) = gallery(10).await;
        let outcome = gallery
            .upload_batch(vec![
                ("good.png".to_string(), png(8, 8)),
                ("notes.txt".to_string(), b"hello".to_vec()),
            ])
            .await
            .unwrap();
        assert_eq!(outcome.successful.len(), 1);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].filename, "notes.txt");
        // Wrong extension and undecodable content are both reported.
        assert_eq!(outcome.failed[0].errors.len(), 2);
    }

    #[tokio::test]
    async fn test_upload_name_with_interior_dots() {
        let (_dir, gallery) = gallery(10).await;
        let outcome = gallery
            .upload_batch(vec![("v1..2.png".to_string(), png(5, 5))])
            .await
            .unwrap();
        assert!(outcome.failed.is_empty(), "{:?}", outcome.failed);
        assert_eq!(outcome.successful.len(), 1);

        let stored = &outcome.successful[0].filename;
        assert!(stored.starts_with("v1..2_"));
        assert_eq!(gallery.info(stored).await.unwrap().metadata.width, 5);
    }

    #[tokio::test]
    async fn test_too_many_files_rejects_batch() {
        let (_dir, gallery) = gallery(2).await;
        let files = (0..3).map(|i| (format!("{}.png", i), png(4, 4))).collect();
        let err = gallery.upload_batch(files).await.unwrap_err();
        assert!(matches!(err, ProcessingError::TooManyFiles { count: 3, max: 2 }));
        assert!(gallery.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_skips_unreadable_files() {
        let (_dir, gallery) = gallery(10).await;
        gallery.uploads.put("broken.png", b"not an image".to_vec()).await.unwrap();
        gallery.uploads.put("readme.md", b"# hi".to_vec()).await.unwrap();
        gallery.save("ok.png", png(3, 3)).await.unwrap();

        let images = gallery.list().await.unwrap();
        assert_eq!(images.len(), 1);
        assert!(images[0].filename.starts_with("ok_"));
    }

    #[tokio::test]
    async fn test_info_read_and_delete() {
        let (_dir, gallery) = gallery(10).await;
        let stored = gallery.save("wide.png", png(200, 100)).await.unwrap();

        let info = gallery.info(&stored.filename).await.unwrap();
        assert_eq!(info.aspect_ratio, 2.0);
        assert!(!info.has_transparency);

        assert!(!gallery.read(&stored.filename).await.unwrap().is_empty());
        assert!(gallery.delete(&stored.filename).await.unwrap());
        assert!(!gallery.delete(&stored.filename).await.unwrap());
        assert!(matches!(
            gallery.read(&stored.filename).await.unwrap_err(),
            ProcessingError::NotFound(_)
        ));
    }
}
