use api_types::skunk::{SkunkDto, SkunkEnvelope, SkunkRequest};
use domain::{NetworkError, NetworkResult};
use reqwest::Method;

use super::{ApiClient, ErrorStyle, decode};

impl ApiClient {
    pub async fn submit_skunk(&self, request: &SkunkRequest) -> NetworkResult<SkunkDto> {
        self.submit_skunk_inner(request).await.into()
    }

    async fn submit_skunk_inner(&self, request: &SkunkRequest) -> Result<SkunkDto, NetworkError> {
        let path = "user_skunks";
        let builder = self.request(Method::POST, path).await.json(request);
        let res = self
            .send(&Method::POST, path, builder, ErrorStyle::Raw)
            .await?;
        decode::<SkunkEnvelope>(res).await.map(|res| res.user_skunk)
    }
}
