//! SQLite cache of the catches fetched from the backend.
//!
//! Rows are written after every successful fetch and read when the backend
//! cannot be reached.

pub mod catches;

use domain::StorageError;
use sea_orm::{
    ActiveValue, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*,
};

fn db_err(err: DbErr) -> StorageError {
    StorageError::Database(err.to_string())
}

#[derive(Clone, Debug)]
pub struct CatchCache {
    database: DatabaseConnection,
}

impl CatchCache {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    /// All cached catches, most recent first.
    pub async fn all(&self) -> Result<Vec<catches::Model>, StorageError> {
        catches::Entity::find()
            .order_by_desc(catches::Column::CaughtAt)
            .all(&self.database)
            .await
            .map_err(db_err)
    }

    pub async fn by_id(&self, id: &str) -> Result<Option<catches::Model>, StorageError> {
        catches::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await
            .map_err(db_err)
    }

    /// Inserts the rows, replacing any cached row with the same id.
    pub async fn upsert_all(&self, rows: Vec<catches::Model>) -> Result<(), StorageError> {
        if rows.is_empty() {
            return Ok(());
        }
        let db_tx = self.database.begin().await.map_err(db_err)?;
        let ids = rows.iter().map(|row| row.id.clone()).collect::<Vec<_>>();
        catches::Entity::delete_many()
            .filter(catches::Column::Id.is_in(ids))
            .exec(&db_tx)
            .await
            .map_err(db_err)?;
        catches::Entity::insert_many(rows.into_iter().map(active_model))
            .exec_without_returning(&db_tx)
            .await
            .map_err(db_err)?;
        db_tx.commit().await.map_err(db_err)
    }

    /// Drops every cached row and stores `rows` instead.
    pub async fn replace_all(&self, rows: Vec<catches::Model>) -> Result<(), StorageError> {
        let db_tx = self.database.begin().await.map_err(db_err)?;
        catches::Entity::delete_many()
            .exec(&db_tx)
            .await
            .map_err(db_err)?;
        if !rows.is_empty() {
            catches::Entity::insert_many(rows.into_iter().map(active_model))
                .exec_without_returning(&db_tx)
                .await
                .map_err(db_err)?;
        }
        db_tx.commit().await.map_err(db_err)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        catches::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await
            .map(|_| ())
            .map_err(db_err)
    }
}

fn active_model(row: catches::Model) -> catches::ActiveModel {
    catches::ActiveModel {
        id: ActiveValue::Set(row.id),
        species: ActiveValue::Set(row.species),
        location: ActiveValue::Set(row.location),
        latitude: ActiveValue::Set(row.latitude),
        longitude: ActiveValue::Set(row.longitude),
        caught_at: ActiveValue::Set(row.caught_at),
        notes: ActiveValue::Set(row.notes),
        weight: ActiveValue::Set(row.weight),
        length: ActiveValue::Set(row.length),
        image_url: ActiveValue::Set(row.image_url),
        weather_data: ActiveValue::Set(row.weather_data),
        inserted_at: ActiveValue::Set(row.inserted_at),
        updated_at: ActiveValue::Set(row.updated_at),
        cached_at: ActiveValue::Set(row.cached_at),
    }
}
