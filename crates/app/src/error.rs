use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("backend client error: {0}")]
    Client(#[from] domain::NetworkError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A screen reported an error; already rendered for the user.
    #[error("{0}")]
    Screen(String),
}
