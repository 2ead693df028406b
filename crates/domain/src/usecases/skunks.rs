use std::sync::Arc;

use crate::{
    error::UseCaseError,
    outcome::UseCaseResult,
    skunks::{SkunkRepository, SubmitSkunkEntity},
};

#[derive(Clone)]
pub struct SubmitSkunkUseCase {
    repository: Arc<dyn SkunkRepository>,
}

impl SubmitSkunkUseCase {
    pub fn new(repository: Arc<dyn SkunkRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, entity: SubmitSkunkEntity) -> UseCaseResult<String> {
        self.repository
            .submit_skunk(entity)
            .await
            .map_err(|err| UseCaseError::from_data("SubmitSkunkUseCase", "Failed to log skunk", err))
    }
}
