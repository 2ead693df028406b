//! Conversions between wire types, cache rows and domain entities.

use std::collections::BTreeMap;

use api_types::{auth::UserDto, catch::CatchDto};
use chrono::{DateTime, Utc};
use domain::{CatchDetailsEntity, CatchEntity, UserEntity};
use serde_json::{Map, Value};

use crate::cache::catches;

const UNKNOWN_LOCATION: &str = "Unknown location";
const UNKNOWN_DATE: &str = "Unknown date";

/// `YYYY-MM-DD` part of an RFC 3339 timestamp.
fn date_part(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn catch_entity(dto: &CatchDto) -> CatchEntity {
    let description = match non_blank(dto.notes.as_deref()) {
        Some(notes) => notes.to_string(),
        None => format!("Caught a {} at {}", dto.species, dto.location),
    };
    CatchEntity {
        id: dto.id.clone(),
        name: dto.species.clone(),
        description,
        date_caught: date_part(&dto.caught_at).to_string(),
        location: dto.location.clone(),
        image_url: dto.image_url.clone(),
        weight: dto.weight,
        length: dto.length,
    }
}

pub fn catch_details(dto: &CatchDto) -> CatchDetailsEntity {
    let location = if dto.location.trim().is_empty() {
        UNKNOWN_LOCATION.to_string()
    } else {
        dto.location.clone()
    };
    let date_caught = match date_part(&dto.caught_at) {
        "" => UNKNOWN_DATE.to_string(),
        date => date.to_string(),
    };
    let weather = dto
        .weather_data
        .iter()
        .flatten()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect::<BTreeMap<_, _>>();

    CatchDetailsEntity {
        id: dto.id.clone(),
        species: dto.species.clone(),
        weight: dto.weight,
        length: dto.length,
        latitude: dto.latitude,
        longitude: dto.longitude,
        timestamp: dto.caught_at.clone(),
        photo_url: dto.image_url.clone(),
        location,
        date_caught,
        notes: non_blank(dto.notes.as_deref()).map(str::to_string),
        weather,
    }
}

pub fn cache_row(dto: &CatchDto, cached_at: DateTime<Utc>) -> catches::Model {
    catches::Model {
        id: dto.id.clone(),
        species: dto.species.clone(),
        location: dto.location.clone(),
        latitude: dto.latitude,
        longitude: dto.longitude,
        caught_at: dto.caught_at.clone(),
        notes: dto.notes.clone(),
        weight: dto.weight,
        length: dto.length,
        image_url: dto.image_url.clone(),
        weather_data: dto
            .weather_data
            .as_ref()
            .and_then(|map| serde_json::to_string(map).ok()),
        inserted_at: dto.inserted_at.clone(),
        updated_at: dto.updated_at.clone(),
        cached_at,
    }
}

impl From<catches::Model> for CatchDto {
    fn from(row: catches::Model) -> Self {
        Self {
            id: row.id,
            species: row.species,
            location: row.location,
            latitude: row.latitude,
            longitude: row.longitude,
            caught_at: row.caught_at,
            notes: row.notes,
            weight: row.weight,
            length: row.length,
            weather_data: row
                .weather_data
                .and_then(|raw| serde_json::from_str::<Map<String, Value>>(&raw).ok()),
            exif_data: None,
            image_url: row.image_url,
            image_filename: None,
            image_content_type: None,
            image_file_size: None,
            inserted_at: row.inserted_at,
            updated_at: row.updated_at,
        }
    }
}

pub fn user_entity(dto: &UserDto, token: Option<String>) -> UserEntity {
    UserEntity {
        id: dto.id.to_string(),
        email: dto.email.clone(),
        username: UserEntity::display_name(
            dto.first_name.as_deref(),
            dto.last_name.as_deref(),
            &dto.email,
        ),
        token,
    }
}
