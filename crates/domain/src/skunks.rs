//! Skunks: fishing trips that ended without a catch.

use async_trait::async_trait;

use crate::outcome::DataResult;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmitSkunkEntity {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// RFC 3339 timestamp.
    pub fished_at: String,
    pub notes: Option<String>,
}

#[async_trait]
pub trait SkunkRepository: Send + Sync {
    /// Returns the id assigned by the backend.
    async fn submit_skunk(&self, entity: SubmitSkunkEntity) -> DataResult<String>;
}
