//! Photo loading for upload.
//!
//! Photos are uploaded byte for byte: re-encoding would strip the EXIF
//! block the backend reads the capture time and GPS position from.

use std::path::PathBuf;

use async_trait::async_trait;
use domain::{ImageError, ImageProcessor};

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP1: u8 = 0xE1;
const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;
const EXIF_HEADER: &[u8] = b"Exif\0\0";

#[derive(Clone, Debug, Default)]
pub struct FsImageProcessor;

impl FsImageProcessor {
    pub fn new() -> Self {
        Self
    }
}

fn path_from_uri(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

#[async_trait]
impl ImageProcessor for FsImageProcessor {
    async fn load_image(&self, uri: &str) -> Result<Vec<u8>, ImageError> {
        let bytes = tokio::fs::read(path_from_uri(uri))
            .await
            .map_err(|err| ImageError::Read {
                uri: uri.to_string(),
                reason: err.to_string(),
            })?;
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        Ok(bytes)
    }

    fn process_with_exif(&self, bytes: Vec<u8>) -> Result<Vec<u8>, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if !bytes.starts_with(&SOI) {
            return Err(ImageError::Unsupported);
        }
        if has_exif_segment(&bytes) {
            tracing::debug!(size = bytes.len(), "jpeg carries exif metadata");
        } else {
            tracing::warn!(size = bytes.len(), "jpeg has no exif metadata");
        }
        Ok(bytes)
    }
}

/// Walks the JPEG marker segments up to the start of scan looking for an
/// APP1 `Exif` segment.
fn has_exif_segment(bytes: &[u8]) -> bool {
    let mut pos = SOI.len();
    while let Some(header) = bytes.get(pos..pos + 4) {
        if header[0] != 0xFF {
            return false;
        }
        let marker = header[1];
        if marker == SOS || marker == EOI {
            return false;
        }
        let len = usize::from(u16::from_be_bytes([header[2], header[3]]));
        if marker == APP1 && bytes.get(pos + 4..pos + 4 + EXIF_HEADER.len()) == Some(EXIF_HEADER) {
            return true;
        }
        if len < 2 {
            return false;
        }
        pos += 2 + len;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg_with_exif() -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8];
        // APP0 JFIF, 16 bytes
        bytes.extend([0xFF, 0xE0, 0x00, 0x10]);
        bytes.extend(b"JFIF\0");
        bytes.extend([0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
        // APP1 Exif
        bytes.extend([0xFF, 0xE1, 0x00, 0x08]);
        bytes.extend(EXIF_HEADER);
        bytes.extend([0xFF, 0xD9]);
        bytes
    }

    #[test]
    fn finds_exif_after_jfif() {
        assert!(has_exif_segment(&jpeg_with_exif()));
    }

    #[test]
    fn no_exif_in_bare_jpeg() {
        assert!(!has_exif_segment(&[0xFF, 0xD8, 0xFF, 0xD9]));
    }

    #[test]
    fn processing_keeps_bytes() {
        let bytes = jpeg_with_exif();
        let processed = FsImageProcessor::new()
            .process_with_exif(bytes.clone())
            .unwrap();
        assert_eq!(processed, bytes);
    }

    #[test]
    fn rejects_non_jpeg() {
        let png = vec![0x89, b'P', b'N', b'G'];
        assert_eq!(
            FsImageProcessor::new().process_with_exif(png),
            Err(ImageError::Unsupported)
        );
    }

    #[tokio::test]
    async fn loads_from_file_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catch.jpg");
        std::fs::write(&path, jpeg_with_exif()).unwrap();

        let uri = format!("file://{}", path.display());
        let bytes = FsImageProcessor::new().load_image(&uri).await.unwrap();
        assert_eq!(bytes, jpeg_with_exif());
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let err = FsImageProcessor::new()
            .load_image("/definitely/not/here.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::Read { .. }));
    }
}
