//! Device capabilities the core depends on.
//!
//! Implementations live outside the core: the data crate ships file system
//! backed ones, tests use stubs.

use async_trait::async_trait;

use crate::error::{ImageError, LocationError, PhotoCaptureError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedPhoto {
    /// Opaque handle understood by [`ImageProcessor::load_image`].
    pub uri: String,
}

#[async_trait]
pub trait PhotoCapture: Send + Sync {
    /// `Ok(None)` when the user cancelled.
    async fn capture_photo(&self) -> Result<Option<CapturedPhoto>, PhotoCaptureError>;

    /// `Ok(None)` when the user cancelled.
    async fn pick_from_gallery(&self) -> Result<Option<CapturedPhoto>, PhotoCaptureError>;
}

#[async_trait]
pub trait LocationService: Send + Sync {
    async fn has_permission(&self) -> bool;

    /// Returns whether the permission was granted.
    async fn request_permission(&self) -> bool;

    async fn current_location(&self) -> Result<Coordinates, LocationError>;
}

#[async_trait]
pub trait ImageProcessor: Send + Sync {
    async fn load_image(&self, uri: &str) -> Result<Vec<u8>, ImageError>;

    /// Prepares bytes for upload without dropping EXIF metadata; the backend
    /// reads capture time and GPS position from it.
    fn process_with_exif(&self, bytes: Vec<u8>) -> Result<Vec<u8>, ImageError>;
}
