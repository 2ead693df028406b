use std::sync::Arc;

use api_types::auth::{AuthData, LoginRequest, RegisterRequest, UserRegistration};
use async_trait::async_trait;
use domain::{
    AuthRepository, DataError, DataResult, LoginCredentials, NetworkResult, RegisterCredentials,
    StorageError, TokenStorage, UserEntity,
};

use crate::{api::ApiClient, mappers::user_entity};

#[derive(Clone)]
pub struct AuthRepositoryImpl {
    api: ApiClient,
    tokens: Arc<dyn TokenStorage>,
}

impl AuthRepositoryImpl {
    pub fn new(api: ApiClient, tokens: Arc<dyn TokenStorage>) -> Self {
        Self { api, tokens }
    }

    /// Persists the session carried by an auth response.
    async fn store_session(&self, data: AuthData) -> DataResult<UserEntity> {
        let user = user_entity(&data.user, Some(data.token.clone()));
        let user_json =
            serde_json::to_string(&user).map_err(|err| StorageError::Corrupt(err.to_string()))?;
        self.tokens.save_token(&data.token).await?;
        self.tokens.save_user(&user_json).await?;
        tracing::info!(user = %user.email, "session stored");
        Ok(user)
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        self.tokens.clear_token().await?;
        self.tokens.clear_user().await
    }

    async fn authenticate(&self, result: NetworkResult<AuthData>) -> DataResult<UserEntity> {
        let data = result.into_result()?;
        self.store_session(data).await
    }
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn login(&self, credentials: LoginCredentials) -> DataResult<UserEntity> {
        let request = LoginRequest {
            email: credentials.email,
            password: credentials.password,
        };
        self.authenticate(self.api.login(&request).await).await
    }

    async fn register(&self, credentials: RegisterCredentials) -> DataResult<UserEntity> {
        let request = RegisterRequest {
            user: UserRegistration {
                email: credentials.email,
                password: credentials.password,
                first_name: credentials.first_name,
                last_name: credentials.last_name,
            },
        };
        self.authenticate(self.api.register(&request).await).await
    }

    async fn logout(&self) -> DataResult<()> {
        self.clear_session().await?;
        tracing::info!("session cleared");
        Ok(())
    }

    async fn current_user(&self) -> DataResult<Option<UserEntity>> {
        if let Some(raw) = self.tokens.user().await? {
            match serde_json::from_str::<UserEntity>(&raw) {
                Ok(user) => return Ok(Some(user)),
                Err(err) => tracing::warn!("stored user is unreadable, asking the backend: {err}"),
            }
        }

        let Some(token) = self.tokens.token().await? else {
            return Ok(None);
        };

        match self.api.current_user().await.into_result() {
            Ok(dto) => {
                let user = user_entity(&dto, Some(token));
                let user_json = serde_json::to_string(&user)
                    .map_err(|err| StorageError::Corrupt(err.to_string()))?;
                self.tokens.save_user(&user_json).await?;
                Ok(Some(user))
            }
            Err(err) => {
                tracing::warn!("stored session rejected: {err}");
                self.clear_session().await?;
                Err(err.into())
            }
        }
    }

    async fn refresh_token(&self) -> DataResult<UserEntity> {
        if self.tokens.token().await?.is_none() {
            return Err(DataError::Unexpected("No token available".to_string()));
        }
        match self.api.refresh_token().await.into_result() {
            Ok(data) => self.store_session(data).await,
            Err(err) => {
                self.clear_session().await?;
                Err(err.into())
            }
        }
    }

    async fn is_logged_in(&self) -> bool {
        match self.current_user().await {
            Ok(user) => user.is_some(),
            Err(err) => {
                tracing::debug!("not logged in: {err}");
                false
            }
        }
    }
}
