//! Settings for the `hooked` binary.
//!
//! Sources, lowest priority first: the optional TOML file
//! (`config/hooked.toml` unless `--config` says otherwise), `HOOKED__*`
//! environment variables (`HOOKED__API__BASE_URL=...`), then the global
//! command-line overrides.

use std::{path::PathBuf, time::Duration};

use clap::Args;
use domain::Coordinates;
use presentation::features::catches::SubmitMode;
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config/hooked.toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        }
    }
}

/// `memory` or a path to the SQLite file.
impl From<&str> for Database {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("memory") {
            Database::Memory
        } else {
            Database::Sqlite(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Api {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Api {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Cache {
    pub database: Database,
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            database: Database::Sqlite("hooked.db".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Auth {
    /// Session file; the session only lives as long as the process without it.
    pub token_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Measured,
    #[default]
    PhotoOnly,
}

impl From<Mode> for SubmitMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Measured => SubmitMode::Measured,
            Mode::PhotoOnly => SubmitMode::PhotoOnly,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Submit {
    pub mode: Mode,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Location> for Coordinates {
    fn from(location: Location) -> Self {
        Coordinates {
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub api: Api,
    pub cache: Cache,
    pub auth: Auth,
    pub submit: Submit,
    /// Position reported as the device location; location access is denied
    /// when absent.
    pub location: Option<Location>,
}

/// Overrides accepted by every subcommand.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the backend base URL (e.g. http://127.0.0.1:4000/api).
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override the cache database: `memory` or a SQLite file path.
    #[arg(long, global = true)]
    pub database: Option<String>,
    /// Override the log level.
    #[arg(long, global = true)]
    pub level: Option<String>,
}

impl Settings {
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let config_path = overrides.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("HOOKED").separator("__"))
            .build()?
            .try_deserialize()?;

        if let Some(base_url) = &overrides.base_url {
            settings.api.base_url = base_url.clone();
        }
        if let Some(database) = &overrides.database {
            settings.cache.database = Database::from(database.as_str());
        }
        if let Some(level) = &overrides.level {
            settings.app.level = level.clone();
        }

        Ok(settings)
    }
}
