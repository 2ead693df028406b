use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{error::UseCaseError, outcome::UseCaseResult, platform::ImageProcessor};

/// Loads a picked photo and encodes it for submission.
#[derive(Clone)]
pub struct ConvertImageToBase64UseCase {
    processor: Arc<dyn ImageProcessor>,
}

impl ConvertImageToBase64UseCase {
    pub fn new(processor: Arc<dyn ImageProcessor>) -> Self {
        Self { processor }
    }

    pub async fn execute(&self, uri: &str) -> UseCaseResult<String> {
        let bytes = self
            .processor
            .load_image(uri)
            .await
            .and_then(|bytes| self.processor.process_with_exif(bytes))
            .map_err(|err| {
                tracing::error!(uri, error = %err, "image conversion failed");
                UseCaseError::new(format!("Failed to process image: {err}"))
                    .with_context("ConvertImageToBase64UseCase")
            })?;
        tracing::debug!(uri, size = bytes.len(), "image ready for upload");
        Ok(STANDARD.encode(bytes))
    }
}
