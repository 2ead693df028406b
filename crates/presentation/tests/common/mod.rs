#![allow(dead_code)]

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use domain::{
    AuthRepository, CapturedPhoto, CatchDetailsEntity, CatchEntity, CatchRepository, Coordinates,
    DataError, DataResult, FishingInsights, ImageError, ImageProcessor, LocationError,
    LocationService, LoginCredentials, NetworkError, PhotoCapture, PhotoCaptureError,
    RegisterCredentials, SkunkRepository, StatsEntity, SubmitCatchEntity, SubmitSkunkEntity,
    UserEntity,
};

pub fn failure(message: &str) -> DataError {
    DataError::Network(NetworkError::Transport(message.to_string()))
}

pub fn catch(id: &str, name: &str) -> CatchEntity {
    CatchEntity {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("Caught a {name} at Lake"),
        date_caught: "2026-05-01".to_string(),
        location: "Lake".to_string(),
        image_url: Some(format!("https://img.test/{id}.jpg")),
        weight: None,
        length: None,
    }
}

pub fn measured(id: &str, name: &str, location: &str, weight: f64, length: f64) -> CatchEntity {
    CatchEntity {
        location: location.to_string(),
        weight: Some(weight),
        length: Some(length),
        ..catch(id, name)
    }
}

/// Collects whatever effects were emitted so far.
pub fn drain<E: Clone>(effects: &mut broadcast::Receiver<E>) -> Vec<E> {
    let mut seen = Vec::new();
    while let Ok(effect) = effects.try_recv() {
        seen.push(effect);
    }
    seen
}

/// Catch repository answering from canned results.
pub struct FakeCatches {
    pub catches: Mutex<Result<Vec<CatchEntity>, String>>,
    pub details: Mutex<Result<CatchDetailsEntity, String>>,
    pub submit_result: Mutex<Result<String, String>>,
    pub submit_delay: Duration,
    pub submitted: Mutex<Vec<SubmitCatchEntity>>,
    pub delete_result: Mutex<Result<(), String>>,
    pub insights: Mutex<Result<String, String>>,
    pub catches_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
}

impl Default for FakeCatches {
    fn default() -> Self {
        Self {
            catches: Mutex::new(Ok(Vec::new())),
            details: Mutex::new(Err("not found".to_string())),
            submit_result: Mutex::new(Ok("42".to_string())),
            submit_delay: Duration::ZERO,
            submitted: Mutex::new(Vec::new()),
            delete_result: Mutex::new(Ok(())),
            insights: Mutex::new(Ok("Fish at dawn".to_string())),
            catches_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeCatches {
    pub fn with_catches(catches: Vec<CatchEntity>) -> Self {
        Self {
            catches: Mutex::new(Ok(catches)),
            ..Self::default()
        }
    }

    pub fn submit_count(&self) -> usize {
        self.submitted.lock().len()
    }

    fn current_catches(&self) -> DataResult<Vec<CatchEntity>> {
        self.catches.lock().clone().map_err(|msg| failure(&msg))
    }
}

#[async_trait]
impl CatchRepository for FakeCatches {
    async fn catches(&self) -> DataResult<Vec<CatchEntity>> {
        self.catches_calls.fetch_add(1, Ordering::SeqCst);
        self.current_catches()
    }

    async fn refresh_catches(&self) -> DataResult<Vec<CatchEntity>> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.current_catches()
    }

    async fn catch_details(&self, _id: &str) -> DataResult<CatchDetailsEntity> {
        self.details.lock().clone().map_err(|msg| failure(&msg))
    }

    async fn submit_catch(&self, entity: SubmitCatchEntity) -> DataResult<String> {
        self.submitted.lock().push(entity);
        if !self.submit_delay.is_zero() {
            tokio::time::sleep(self.submit_delay).await;
        }
        self.submit_result.lock().clone().map_err(|msg| failure(&msg))
    }

    async fn delete_catch(&self, _id: &str) -> DataResult<()> {
        self.delete_result.lock().clone().map_err(|msg| failure(&msg))
    }

    async fn catch_stats(&self) -> DataResult<StatsEntity> {
        Ok(StatsEntity::from_catches(&self.current_catches()?))
    }

    async fn fishing_insights(&self) -> DataResult<FishingInsights> {
        self.insights
            .lock()
            .clone()
            .map(|insights| FishingInsights { insights })
            .map_err(|msg| failure(&msg))
    }
}

pub struct FakeImages {
    pub bytes: Result<Vec<u8>, ImageError>,
    pub loads: AtomicUsize,
    /// Number of loads left that panic instead of answering.
    pub panics: AtomicUsize,
}

impl FakeImages {
    pub fn jpeg() -> Self {
        Self {
            bytes: Ok(vec![0xFF, 0xD8, 0xFF, 0xD9]),
            loads: AtomicUsize::new(0),
            panics: AtomicUsize::new(0),
        }
    }

    pub fn panicking_once() -> Self {
        Self {
            panics: AtomicUsize::new(1),
            ..Self::jpeg()
        }
    }

    pub fn failing(err: ImageError) -> Self {
        Self {
            bytes: Err(err),
            loads: AtomicUsize::new(0),
            panics: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ImageProcessor for FakeImages {
    async fn load_image(&self, _uri: &str) -> Result<Vec<u8>, ImageError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self
            .panics
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            panic!("decoder crashed");
        }
        self.bytes.clone()
    }

    fn process_with_exif(&self, bytes: Vec<u8>) -> Result<Vec<u8>, ImageError> {
        Ok(bytes)
    }
}

/// Photo source returning the same outcome for camera and gallery.
pub struct FakePhotos(pub Result<Option<String>, PhotoCaptureError>);

#[async_trait]
impl PhotoCapture for FakePhotos {
    async fn capture_photo(&self) -> Result<Option<CapturedPhoto>, PhotoCaptureError> {
        self.pick_from_gallery().await
    }

    async fn pick_from_gallery(&self) -> Result<Option<CapturedPhoto>, PhotoCaptureError> {
        self.0
            .clone()
            .map(|uri| uri.map(|uri| CapturedPhoto { uri }))
    }
}

pub struct FakeLocation {
    pub permitted: AtomicBool,
    /// Whether a permission prompt is answered with "allow".
    pub grants: bool,
    pub location: Result<Coordinates, LocationError>,
}

impl FakeLocation {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            permitted: AtomicBool::new(true),
            grants: true,
            location: Ok(Coordinates {
                latitude,
                longitude,
            }),
        }
    }

    pub fn denied() -> Self {
        Self {
            permitted: AtomicBool::new(false),
            grants: false,
            location: Err(LocationError::PermissionDenied),
        }
    }

    /// No permission yet, granted once asked.
    pub fn asking(latitude: f64, longitude: f64) -> Self {
        Self {
            permitted: AtomicBool::new(false),
            ..Self::at(latitude, longitude)
        }
    }
}

#[async_trait]
impl LocationService for FakeLocation {
    async fn has_permission(&self) -> bool {
        self.permitted.load(Ordering::SeqCst)
    }

    async fn request_permission(&self) -> bool {
        if self.grants {
            self.permitted.store(true, Ordering::SeqCst);
        }
        self.grants
    }

    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        self.location.clone()
    }
}

pub fn user(username: &str) -> UserEntity {
    UserEntity {
        id: "7".to_string(),
        email: "ada@example.com".to_string(),
        username: username.to_string(),
        token: Some("token-7".to_string()),
    }
}

pub struct FakeAuth {
    pub login_result: Mutex<Result<UserEntity, String>>,
    pub current: Mutex<Result<Option<UserEntity>, String>>,
    pub logins: Mutex<Vec<LoginCredentials>>,
    pub registrations: Mutex<Vec<RegisterCredentials>>,
    pub logouts: AtomicUsize,
}

impl Default for FakeAuth {
    fn default() -> Self {
        Self {
            login_result: Mutex::new(Ok(user("Ada Lovelace"))),
            current: Mutex::new(Ok(Some(user("Ada Lovelace")))),
            logins: Mutex::new(Vec::new()),
            registrations: Mutex::new(Vec::new()),
            logouts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AuthRepository for FakeAuth {
    async fn login(&self, credentials: LoginCredentials) -> DataResult<UserEntity> {
        self.logins.lock().push(credentials);
        self.login_result.lock().clone().map_err(|msg| failure(&msg))
    }

    async fn register(&self, credentials: RegisterCredentials) -> DataResult<UserEntity> {
        self.registrations.lock().push(credentials);
        self.login_result.lock().clone().map_err(|msg| failure(&msg))
    }

    async fn logout(&self) -> DataResult<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn current_user(&self) -> DataResult<Option<UserEntity>> {
        self.current.lock().clone().map_err(|msg| failure(&msg))
    }

    async fn refresh_token(&self) -> DataResult<UserEntity> {
        self.login_result.lock().clone().map_err(|msg| failure(&msg))
    }

    async fn is_logged_in(&self) -> bool {
        matches!(*self.current.lock(), Ok(Some(_)))
    }
}

pub struct FakeSkunks {
    pub result: Result<String, String>,
    pub submitted: Mutex<Vec<SubmitSkunkEntity>>,
}

impl FakeSkunks {
    pub fn answering(result: Result<&str, &str>) -> Self {
        Self {
            result: result.map(str::to_string).map_err(str::to_string),
            submitted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SkunkRepository for FakeSkunks {
    async fn submit_skunk(&self, entity: SubmitSkunkEntity) -> DataResult<String> {
        self.submitted.lock().push(entity);
        self.result.clone().map_err(|msg| failure(&msg))
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
