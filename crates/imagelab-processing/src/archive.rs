//! ZIP packaging for batch downloads

use crate::error::{ProcessingError, ProcessingResult};
use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// Build a deflated ZIP holding each `(entry name, bytes)` pair in order.
pub fn create_zip_archive(entries: Vec<(String, Vec<u8>)>) -> ProcessingResult<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        for (name, data) in entries {
            zip.start_file(name.as_str(), options).map_err(|e| {
                ProcessingError::Archive(format!("Failed to add {} to ZIP: {}", name, e))
            })?;
            zip.write_all(&data).map_err(|e| {
                ProcessingError::Archive(format!("Failed to write {} to ZIP: {}", name, e))
            })?;
        }

        zip.finish()
            .map_err(|e| ProcessingError::Archive(format!("Failed to finalize ZIP: {}", e)))?;
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_archive_contains_entries() {
        let bytes = create_zip_archive(vec![
            ("a_grayscale.png".to_string(), vec![1, 2, 3]),
            ("b_preset_denoise.jpg".to_string(), vec![4; 100]),
        ])
        .unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut entry = archive.by_name("b_preset_denoise.jpg").unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(content, vec![4; 100]);
    }

    #[test]
    fn test_empty_archive_is_valid() {
        let bytes = create_zip_archive(Vec::new()).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
