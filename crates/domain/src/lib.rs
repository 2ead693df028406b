//! Core of Hooked: entities, repository and device contracts, use-cases.
//!
//! Nothing in here knows about HTTP, SQL or the file system; those live in
//! the `data` crate behind the traits defined here.

pub mod auth;
pub mod catches;
pub mod error;
pub mod outcome;
pub mod platform;
pub mod skunks;
pub mod usecases;

pub use auth::{AuthRepository, LoginCredentials, RegisterCredentials, TokenStorage, UserEntity};
pub use catches::{
    CatchDetailsEntity, CatchEntity, CatchRepository, FishingInsights, SpeciesData, StatsEntity,
    SubmitCatchEntity,
};
pub use error::{
    DataError, ImageError, LocationError, NetworkError, PhotoCaptureError, StorageError,
    UseCaseError,
};
pub use outcome::{DataResult, NetworkResult, UseCaseResult};
pub use platform::{CapturedPhoto, Coordinates, ImageProcessor, LocationService, PhotoCapture};
pub use skunks::{SkunkRepository, SubmitSkunkEntity};
