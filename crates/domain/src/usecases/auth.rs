use std::sync::Arc;

use crate::{
    auth::{AuthRepository, LoginCredentials, RegisterCredentials, UserEntity},
    error::UseCaseError,
    outcome::UseCaseResult,
};

#[derive(Clone)]
pub struct LoginUseCase {
    repository: Arc<dyn AuthRepository>,
}

impl LoginUseCase {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, credentials: LoginCredentials) -> UseCaseResult<UserEntity> {
        self.repository
            .login(credentials)
            .await
            .map_err(|err| UseCaseError::from_data("LoginUseCase", "Login failed", err))
    }
}

#[derive(Clone)]
pub struct RegisterUseCase {
    repository: Arc<dyn AuthRepository>,
}

impl RegisterUseCase {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, credentials: RegisterCredentials) -> UseCaseResult<UserEntity> {
        self.repository
            .register(credentials)
            .await
            .map_err(|err| UseCaseError::from_data("RegisterUseCase", "Registration failed", err))
    }
}

#[derive(Clone)]
pub struct LogoutUseCase {
    repository: Arc<dyn AuthRepository>,
}

impl LogoutUseCase {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> UseCaseResult<()> {
        self.repository
            .logout()
            .await
            .map_err(|err| UseCaseError::from_data("LogoutUseCase", "Logout failed", err))
    }
}

#[derive(Clone)]
pub struct GetCurrentUserUseCase {
    repository: Arc<dyn AuthRepository>,
}

impl GetCurrentUserUseCase {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> UseCaseResult<Option<UserEntity>> {
        self.repository.current_user().await.map_err(|err| {
            UseCaseError::from_data("GetCurrentUserUseCase", "Failed to get current user", err)
        })
    }
}

#[derive(Clone)]
pub struct RefreshTokenUseCase {
    repository: Arc<dyn AuthRepository>,
}

impl RefreshTokenUseCase {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> UseCaseResult<UserEntity> {
        self.repository
            .refresh_token()
            .await
            .map_err(|err| UseCaseError::from_data("RefreshTokenUseCase", "Token refresh failed", err))
    }
}

#[derive(Clone)]
pub struct CheckAuthStatusUseCase {
    repository: Arc<dyn AuthRepository>,
}

impl CheckAuthStatusUseCase {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> bool {
        self.repository.is_logged_in().await
    }
}
