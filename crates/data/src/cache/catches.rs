//! Locally cached catches.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "catches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub species: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub caught_at: String,
    pub notes: Option<String>,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub image_url: Option<String>,
    /// JSON object, as received from the backend.
    #[sea_orm(column_type = "Text", nullable)]
    pub weather_data: Option<String>,
    pub inserted_at: String,
    pub updated_at: String,
    pub cached_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
