use api_types::auth::{
    AuthData, AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest, UserDto,
};
use domain::{NetworkError, NetworkResult};
use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, ErrorStyle, decode};

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> NetworkResult<AuthData> {
        self.post_auth("auth/login", Some(request)).await.into()
    }

    pub async fn register(&self, request: &RegisterRequest) -> NetworkResult<AuthData> {
        self.post_auth("auth/register", Some(request)).await.into()
    }

    /// Exchanges the stored token for a fresh one.
    pub async fn refresh_token(&self) -> NetworkResult<AuthData> {
        self.post_auth::<()>("auth/refresh", None).await.into()
    }

    pub async fn current_user(&self) -> NetworkResult<UserDto> {
        self.current_user_inner().await.into()
    }

    async fn current_user_inner(&self) -> Result<UserDto, NetworkError> {
        let path = "auth/me";
        let builder = self.request(Method::GET, path).await;
        let res = self
            .send(&Method::GET, path, builder, ErrorStyle::Detailed)
            .await?;
        decode::<CurrentUserResponse>(res).await.map(|res| res.data)
    }

    async fn post_auth<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&T>,
    ) -> Result<AuthData, NetworkError> {
        let mut builder = self.request(Method::POST, path).await;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let res = self
            .send(&Method::POST, path, builder, ErrorStyle::Detailed)
            .await?;
        decode::<AuthResponse>(res).await.map(|res| res.data)
    }
}
