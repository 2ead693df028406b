mod auth;
mod catches;
mod skunks;

pub use auth::AuthRepositoryImpl;
pub use catches::CatchRepositoryImpl;
pub use skunks::SkunkRepositoryImpl;
