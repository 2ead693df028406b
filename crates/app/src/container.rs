//! Composition root: everything the screens need, built once at startup.

use std::{path::PathBuf, sync::Arc};

use data::{
    ApiClient, AuthRepositoryImpl, CatchCache, CatchRepositoryImpl, FilePhotoSource,
    FileTokenStorage, FixedLocationService, FsImageProcessor, InMemoryTokenStorage,
    SkunkRepositoryImpl,
};
use domain::{
    AuthRepository, CatchRepository, ImageProcessor, LocationService, SkunkRepository,
    TokenStorage,
    usecases::{
        CheckAuthStatusUseCase, ConvertImageToBase64UseCase, DeleteCatchUseCase,
        GetCatchDetailsUseCase, GetCatchStatsUseCase, GetCatchesUseCase, GetCurrentUserUseCase,
        GetFishingInsightsUseCase, LoginUseCase, LogoutUseCase, RefreshCatchesUseCase,
        RegisterUseCase, SubmitCatchUseCase, SubmitSkunkUseCase,
    },
};
use migration::{Migrator, MigratorTrait};
use presentation::features::{
    auth::{CreateAccountViewModel, LoginViewModel, ProfileIntent, ProfileViewModel},
    catches::{
        CatchDetailsViewModel, CatchGridViewModel, StatsIntent, StatsViewModel,
        SubmitCatchViewModel,
    },
    skunks::SubmitSkunkViewModel,
};
use sea_orm::DatabaseConnection;

use crate::{
    error::Result,
    screen::Screen,
    settings::{Database, Settings},
};

pub struct AppContainer {
    settings: Settings,
    catches: Arc<dyn CatchRepository>,
    auth: Arc<dyn AuthRepository>,
    skunks: Arc<dyn SkunkRepository>,
    images: Arc<dyn ImageProcessor>,
    location: Arc<dyn LocationService>,
}

impl AppContainer {
    pub async fn build(settings: Settings) -> Result<Self> {
        let database = connect(&settings.cache.database).await?;
        let tokens: Arc<dyn TokenStorage> = match &settings.auth.token_path {
            Some(path) => Arc::new(FileTokenStorage::load_or_empty(path.clone())),
            None => Arc::new(InMemoryTokenStorage::new()),
        };
        let api = ApiClient::new(&settings.api.base_url, settings.api.timeout(), tokens.clone())?;
        tracing::info!(base_url = %settings.api.base_url, "backend client ready");

        let location = FixedLocationService::new(settings.location.map(Into::into));
        Ok(Self {
            catches: Arc::new(CatchRepositoryImpl::new(api.clone(), CatchCache::new(database))),
            auth: Arc::new(AuthRepositoryImpl::new(api.clone(), tokens)),
            skunks: Arc::new(SkunkRepositoryImpl::new(api)),
            images: Arc::new(FsImageProcessor::new()),
            location: Arc::new(location),
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn is_logged_in(&self) -> bool {
        CheckAuthStatusUseCase::new(self.auth.clone()).execute().await
    }

    pub fn catch_grid(&self) -> Screen<CatchGridViewModel> {
        Screen::new(CatchGridViewModel::new(
            GetCatchesUseCase::new(self.catches.clone()),
            RefreshCatchesUseCase::new(self.catches.clone()),
            DeleteCatchUseCase::new(self.catches.clone()),
        ))
    }

    pub fn catch_details(&self) -> Screen<CatchDetailsViewModel> {
        Screen::new(CatchDetailsViewModel::new(GetCatchDetailsUseCase::new(
            self.catches.clone(),
        )))
    }

    /// Starts loading the stats right away.
    pub fn stats(&self) -> Screen<StatsViewModel> {
        let screen = Screen::new(StatsViewModel::new(
            GetCatchStatsUseCase::new(self.catches.clone()),
            GetFishingInsightsUseCase::new(self.catches.clone()),
        ));
        screen.send(StatsIntent::LoadStats);
        screen
    }

    /// `photo` stands in for the gallery: picking returns it.
    pub fn submit_catch(&self, photo: Option<PathBuf>) -> Screen<SubmitCatchViewModel> {
        Screen::new(SubmitCatchViewModel::new(
            self.settings.submit.mode.into(),
            Arc::new(FilePhotoSource::new(photo)),
            self.location.clone(),
            ConvertImageToBase64UseCase::new(self.images.clone()),
            SubmitCatchUseCase::new(self.catches.clone()),
        ))
    }

    pub fn login(&self) -> Screen<LoginViewModel> {
        Screen::new(LoginViewModel::new(LoginUseCase::new(self.auth.clone())))
    }

    pub fn create_account(&self) -> Screen<CreateAccountViewModel> {
        Screen::new(CreateAccountViewModel::new(RegisterUseCase::new(
            self.auth.clone(),
        )))
    }

    /// Starts loading the profile right away.
    pub fn profile(&self) -> Screen<ProfileViewModel> {
        let screen = Screen::new(ProfileViewModel::new(
            GetCurrentUserUseCase::new(self.auth.clone()),
            LogoutUseCase::new(self.auth.clone()),
        ));
        screen.send(ProfileIntent::LoadProfile);
        screen
    }

    /// Seeds the screen with the current location permission.
    pub async fn submit_skunk(&self) -> Screen<SubmitSkunkViewModel> {
        let granted = self.location.has_permission().await;
        Screen::new(
            SubmitSkunkViewModel::new(
                SubmitSkunkUseCase::new(self.skunks.clone()),
                self.location.clone(),
            )
            .with_location_permission(granted),
        )
    }
}

async fn connect(config: &Database) -> Result<DatabaseConnection> {
    let database = sea_orm::Database::connect(config.url()).await?;
    Migrator::up(&database, None).await?;
    tracing::debug!(?config, "cache database migrated");
    Ok(database)
}
