use std::sync::Arc;

use chrono::{SecondsFormat, Utc};

use crate::{
    catches::{
        CatchDetailsEntity, CatchEntity, CatchRepository, FishingInsights, StatsEntity,
        SubmitCatchEntity,
    },
    error::UseCaseError,
    outcome::UseCaseResult,
};

const UNKNOWN_LOCATION: &str = "Unknown";

#[derive(Clone)]
pub struct GetCatchesUseCase {
    repository: Arc<dyn CatchRepository>,
}

impl GetCatchesUseCase {
    pub fn new(repository: Arc<dyn CatchRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> UseCaseResult<Vec<CatchEntity>> {
        self.repository
            .catches()
            .await
            .map_err(|err| UseCaseError::from_data("GetCatchesUseCase", "Unknown error", err))
    }
}

#[derive(Clone)]
pub struct RefreshCatchesUseCase {
    repository: Arc<dyn CatchRepository>,
}

impl RefreshCatchesUseCase {
    pub fn new(repository: Arc<dyn CatchRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> UseCaseResult<Vec<CatchEntity>> {
        self.repository.refresh_catches().await.map_err(|err| {
            UseCaseError::from_data("RefreshCatchesUseCase", "Failed to refresh catches", err)
        })
    }
}

#[derive(Clone)]
pub struct GetCatchDetailsUseCase {
    repository: Arc<dyn CatchRepository>,
}

impl GetCatchDetailsUseCase {
    pub fn new(repository: Arc<dyn CatchRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &str) -> UseCaseResult<CatchDetailsEntity> {
        self.repository.catch_details(id).await.map_err(|err| {
            UseCaseError::from_data("GetCatchDetailsUseCase", "Catch details not found", err)
        })
    }
}

#[derive(Clone)]
pub struct SubmitCatchUseCase {
    repository: Arc<dyn CatchRepository>,
}

impl SubmitCatchUseCase {
    pub fn new(repository: Arc<dyn CatchRepository>) -> Self {
        Self { repository }
    }

    /// Submits the catch and returns the id assigned by the backend.
    ///
    /// A missing location becomes `"Unknown"` and a missing capture time
    /// becomes now; the backend may still override both from EXIF.
    pub async fn execute(&self, mut entity: SubmitCatchEntity) -> UseCaseResult<String> {
        if entity.location.as_deref().is_none_or(|l| l.trim().is_empty()) {
            entity.location = Some(UNKNOWN_LOCATION.to_string());
        }
        if entity.caught_at.is_none() {
            entity.caught_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }

        let id = self.repository.submit_catch(entity).await.map_err(|err| {
            UseCaseError::from_data("SubmitCatchUseCase", "Failed to submit catch", err)
        })?;

        if id.trim().is_empty() {
            tracing::error!("backend accepted the catch without returning an id");
            return Err(UseCaseError::new("Failed to submit catch - no catch ID returned")
                .with_context("SubmitCatchUseCase"));
        }
        Ok(id)
    }
}

#[derive(Clone)]
pub struct DeleteCatchUseCase {
    repository: Arc<dyn CatchRepository>,
}

impl DeleteCatchUseCase {
    pub fn new(repository: Arc<dyn CatchRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &str) -> UseCaseResult<()> {
        self.repository.delete_catch(id).await.map_err(|err| {
            UseCaseError::from_data("DeleteCatchUseCase", "Failed to delete catch", err)
        })
    }
}

#[derive(Clone)]
pub struct GetCatchStatsUseCase {
    repository: Arc<dyn CatchRepository>,
}

impl GetCatchStatsUseCase {
    pub fn new(repository: Arc<dyn CatchRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> UseCaseResult<StatsEntity> {
        self.repository
            .catch_stats()
            .await
            .map_err(|err| UseCaseError::from_data("GetCatchStatsUseCase", "Failed to load stats", err))
    }
}

#[derive(Clone)]
pub struct GetFishingInsightsUseCase {
    repository: Arc<dyn CatchRepository>,
}

impl GetFishingInsightsUseCase {
    pub fn new(repository: Arc<dyn CatchRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> UseCaseResult<FishingInsights> {
        self.repository.fishing_insights().await.map_err(|err| {
            UseCaseError::from_data(
                "GetFishingInsightsUseCase",
                "Failed to load fishing insights",
                err,
            )
        })
    }
}
