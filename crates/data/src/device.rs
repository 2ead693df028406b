//! Device capabilities for hosts without a camera or GPS receiver.

use std::path::PathBuf;

use async_trait::async_trait;
use domain::{
    CapturedPhoto, Coordinates, LocationError, LocationService, PhotoCapture, PhotoCaptureError,
};

/// Serves a photo already on disk as the "picked" gallery photo.
#[derive(Clone, Debug, Default)]
pub struct FilePhotoSource {
    path: Option<PathBuf>,
}

impl FilePhotoSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl PhotoCapture for FilePhotoSource {
    async fn capture_photo(&self) -> Result<Option<CapturedPhoto>, PhotoCaptureError> {
        Err(PhotoCaptureError::Unavailable(
            "no camera on this device".to_string(),
        ))
    }

    async fn pick_from_gallery(&self) -> Result<Option<CapturedPhoto>, PhotoCaptureError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        match tokio::fs::try_exists(path).await {
            Ok(true) => Ok(Some(CapturedPhoto {
                uri: format!("file://{}", path.display()),
            })),
            Ok(false) => Err(PhotoCaptureError::Failed(format!(
                "{} does not exist",
                path.display()
            ))),
            Err(err) => Err(PhotoCaptureError::Failed(err.to_string())),
        }
    }
}

/// Reports a configured position; without one, location access is denied.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedLocationService {
    coordinates: Option<Coordinates>,
}

impl FixedLocationService {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationService for FixedLocationService {
    async fn has_permission(&self) -> bool {
        self.coordinates.is_some()
    }

    async fn request_permission(&self) -> bool {
        self.coordinates.is_some()
    }

    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        self.coordinates.ok_or(LocationError::PermissionDenied)
    }
}
