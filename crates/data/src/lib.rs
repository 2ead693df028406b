//! Data layer of Hooked: the backend client, the local catch cache and the
//! repository implementations the domain crate asks for.

pub mod api;
pub mod cache;
pub mod device;
pub mod image;
pub mod mappers;
pub mod repositories;
pub mod storage;

pub use api::ApiClient;
pub use cache::CatchCache;
pub use device::{FilePhotoSource, FixedLocationService};
pub use image::FsImageProcessor;
pub use repositories::{AuthRepositoryImpl, CatchRepositoryImpl, SkunkRepositoryImpl};
pub use storage::{FileTokenStorage, InMemoryTokenStorage};
