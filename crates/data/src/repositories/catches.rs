use api_types::catch::{CatchDto, CatchNew};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use domain::{
    CatchDetailsEntity, CatchEntity, CatchRepository, DataError, DataResult, FishingInsights,
    ImageError, StatsEntity, SubmitCatchEntity,
};

use crate::{
    api::ApiClient,
    cache::CatchCache,
    mappers::{cache_row, catch_details, catch_entity},
};

/// Catches backed by the remote API with the local cache as fallback.
#[derive(Clone)]
pub struct CatchRepositoryImpl {
    api: ApiClient,
    cache: CatchCache,
}

impl CatchRepositoryImpl {
    pub fn new(api: ApiClient, cache: CatchCache) -> Self {
        Self { api, cache }
    }

    async fn remember(&self, dtos: &[CatchDto]) {
        let now = Utc::now();
        let rows = dtos.iter().map(|dto| cache_row(dto, now)).collect();
        match self.cache.upsert_all(rows).await {
            Ok(()) => tracing::info!(count = dtos.len(), "cached catches"),
            Err(err) => tracing::warn!("failed to cache catches: {err}"),
        }
    }

    async fn cached(&self) -> Vec<CatchEntity> {
        match self.cache.all().await {
            Ok(rows) => rows
                .into_iter()
                .map(|row| catch_entity(&CatchDto::from(row)))
                .collect(),
            Err(err) => {
                tracing::warn!("failed to read cached catches: {err}");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl CatchRepository for CatchRepositoryImpl {
    async fn catches(&self) -> DataResult<Vec<CatchEntity>> {
        match self.api.catches().await.into_result() {
            Ok(dtos) => {
                self.remember(&dtos).await;
                Ok(dtos.iter().map(catch_entity).collect())
            }
            Err(err) => {
                let cached = self.cached().await;
                if cached.is_empty() {
                    return Err(err.into());
                }
                tracing::warn!(
                    count = cached.len(),
                    "serving cached catches, network failed: {err}"
                );
                Ok(cached)
            }
        }
    }

    async fn refresh_catches(&self) -> DataResult<Vec<CatchEntity>> {
        let dtos = self.api.catches().await.into_result()?;
        let now = Utc::now();
        let rows = dtos.iter().map(|dto| cache_row(dto, now)).collect();
        self.cache.replace_all(rows).await?;
        tracing::info!(count = dtos.len(), "refreshed catch cache");
        Ok(dtos.iter().map(catch_entity).collect())
    }

    async fn catch_details(&self, id: &str) -> DataResult<CatchDetailsEntity> {
        match self.cache.by_id(id).await {
            Ok(Some(row)) => {
                tracing::debug!(id, "catch details served from cache");
                return Ok(catch_details(&CatchDto::from(row)));
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(id, "failed to read cached catch: {err}"),
        }

        let dto = self.api.catch(id).await.into_result()?;
        self.remember(std::slice::from_ref(&dto)).await;
        Ok(catch_details(&dto))
    }

    async fn submit_catch(&self, entity: SubmitCatchEntity) -> DataResult<String> {
        let image = entity
            .image_base64
            .as_deref()
            .map(|encoded| STANDARD.decode(encoded))
            .transpose()
            .map_err(|err| DataError::Image(ImageError::Corrupt(err.to_string())))?;

        let catch = CatchNew {
            species: entity.species,
            location: entity.location,
            caught_at: entity.caught_at,
            latitude: entity.latitude,
            longitude: entity.longitude,
            notes: entity.notes,
            weight: entity.weight,
            length: entity.length,
        };

        let dto = self.api.submit_catch(&catch, image).await.into_result()?;
        tracing::info!(id = %dto.id, species = %dto.species, "catch submitted");
        self.remember(std::slice::from_ref(&dto)).await;
        Ok(dto.id)
    }

    async fn delete_catch(&self, id: &str) -> DataResult<()> {
        self.api.delete_catch(id).await.into_result()?;
        if let Err(err) = self.cache.delete(id).await {
            tracing::warn!(id, "deleted remotely but not from cache: {err}");
        }
        Ok(())
    }

    async fn catch_stats(&self) -> DataResult<StatsEntity> {
        let catches = self.catches().await?;
        Ok(StatsEntity::from_catches(&catches))
    }

    async fn fishing_insights(&self) -> DataResult<FishingInsights> {
        let insights = self.api.insights().await.into_result()?;
        Ok(FishingInsights { insights })
    }
}
