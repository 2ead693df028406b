use api_types::skunk::{SkunkNew, SkunkRequest};
use async_trait::async_trait;
use domain::{DataResult, SkunkRepository, SubmitSkunkEntity};

use crate::api::ApiClient;

#[derive(Clone)]
pub struct SkunkRepositoryImpl {
    api: ApiClient,
}

impl SkunkRepositoryImpl {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SkunkRepository for SkunkRepositoryImpl {
    async fn submit_skunk(&self, entity: SubmitSkunkEntity) -> DataResult<String> {
        let request = SkunkRequest {
            user_skunk: SkunkNew {
                fished_at: entity.fished_at,
                latitude: entity.latitude,
                longitude: entity.longitude,
                notes: entity.notes.filter(|n| !n.trim().is_empty()),
            },
        };
        let skunk = self.api.submit_skunk(&request).await.into_result()?;
        tracing::info!(id = %skunk.id, "skunk logged");
        Ok(skunk.id)
    }
}
