//! Error types shared by every layer.
//!
//! - [`NetworkError`] is produced by the HTTP client.
//! - [`StorageError`] is produced by the local cache and the token storage.
//! - [`DataError`] is what repositories return; it wraps the two above.
//! - [`UseCaseError`] is what use-cases hand to view-models: a message ready
//!   to be shown to the user plus the failure that caused it.
//! - [`ImageError`], [`PhotoCaptureError`] and [`LocationError`] come from the
//!   platform capabilities.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
    /// Non-2xx response, rendered as `[404 Not Found] body`.
    #[error("[{status} {reason}] {body}")]
    Http {
        status: u16,
        reason: String,
        body: String,
    },
    /// Non-2xx response whose body carried a readable message.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    Request(String),
    #[error("request still in progress")]
    NotReady,
}

impl NetworkError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Database(String),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    #[error("cannot read {uri}: {reason}")]
    Read { uri: String, reason: String },
    #[error("image is empty")]
    Empty,
    #[error("unsupported image format")]
    Unsupported,
    #[error("corrupt image data: {0}")]
    Corrupt(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhotoCaptureError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("photo source unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Failed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable: {0}")]
    Unavailable(String),
    #[error("Location request timed out")]
    Timeout,
}

/// Repository failure.
#[derive(Error, Debug)]
pub enum DataError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Unexpected(String),
}

/// Failure handed from a use-case to a view-model.
///
/// `message` is what the user sees. `context` names the use-case that
/// failed and is only used for logging.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct UseCaseError {
    pub message: String,
    pub context: Option<&'static str>,
    #[source]
    pub cause: Option<DataError>,
}

impl UseCaseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            cause: None,
        }
    }

    pub fn with_context(mut self, context: &'static str) -> Self {
        self.context = Some(context);
        self
    }

    /// Wraps a repository failure, keeping its message when it has one and
    /// using `fallback` otherwise. The failure is logged here, once.
    pub fn from_data(context: &'static str, fallback: &str, cause: DataError) -> Self {
        let rendered = cause.to_string();
        let message = if rendered.trim().is_empty() {
            fallback.to_string()
        } else {
            rendered
        };
        tracing::error!(context, error = %message, "use case failed");
        Self {
            message,
            context: Some(context),
            cause: Some(cause),
        }
    }
}

impl PartialEq for UseCaseError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && self.context == other.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_renders_status_and_body() {
        let err = NetworkError::Http {
            status: 404,
            reason: "Not Found".to_string(),
            body: "{\"error\":\"missing\"}".to_string(),
        };
        assert_eq!(err.to_string(), "[404 Not Found] {\"error\":\"missing\"}");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn use_case_error_keeps_cause_message() {
        let err = UseCaseError::from_data(
            "GetCatchesUseCase",
            "Unknown error",
            DataError::Network(NetworkError::Transport("connection refused".to_string())),
        );
        assert_eq!(err.message, "connection refused");
        assert_eq!(err.context, Some("GetCatchesUseCase"));
    }

    #[test]
    fn use_case_error_uses_fallback_for_blank_cause() {
        let err = UseCaseError::from_data(
            "LoginUseCase",
            "Login failed",
            DataError::Unexpected(String::new()),
        );
        assert_eq!(err.message, "Login failed");
    }
}
