use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generic error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Field validation failures, e.g. `{"email": ["has already been taken"]}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorBody {
    /// Flattens the error into a single line.
    ///
    /// `message` wins over `error`; field details are appended as
    /// `"<base> - field: a, b; other: c"`.
    pub fn detailed_message(&self) -> String {
        let base = self.message.as_deref().unwrap_or(&self.error);
        let Some(details) = self.details.as_ref().filter(|d| !d.is_empty()) else {
            return base.to_string();
        };

        let fields = details
            .iter()
            .map(|(field, messages)| {
                let joined = match messages {
                    Value::Array(items) => items
                        .iter()
                        .map(|item| match item {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(", "),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                format!("{field}: {joined}")
            })
            .collect::<Vec<_>>()
            .join("; ");

        format!("{base} - {fields}")
    }
}

pub mod catch {
    use super::*;

    /// A catch as stored by the backend.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CatchDto {
        pub id: String,
        pub species: String,
        pub location: String,
        #[serde(default)]
        pub latitude: Option<f64>,
        #[serde(default)]
        pub longitude: Option<f64>,
        /// RFC 3339 timestamp.
        pub caught_at: String,
        #[serde(default)]
        pub notes: Option<String>,
        #[serde(default)]
        pub weight: Option<f64>,
        #[serde(default)]
        pub length: Option<f64>,
        #[serde(default)]
        pub weather_data: Option<Map<String, Value>>,
        #[serde(default)]
        pub exif_data: Option<Map<String, Value>>,
        #[serde(default)]
        pub image_url: Option<String>,
        #[serde(default)]
        pub image_filename: Option<String>,
        #[serde(default)]
        pub image_content_type: Option<String>,
        #[serde(default)]
        pub image_file_size: Option<i64>,
        pub inserted_at: String,
        pub updated_at: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CatchList {
        pub user_catches: Vec<CatchDto>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CatchEnvelope {
        pub user_catch: CatchDto,
    }

    /// Form fields of `POST /user_catches`; sent as multipart
    /// `user_catch[<field>]` parts next to the `image` part.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct CatchNew {
        pub species: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub location: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub caught_at: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
        pub notes: Option<String>,
        pub weight: Option<f64>,
        pub length: Option<f64>,
    }
}

pub mod insights {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct InsightsResponse {
        pub insights: String,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct RegisterRequest {
        pub user: UserRegistration,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct UserRegistration {
        pub email: String,
        pub password: String,
        pub first_name: String,
        pub last_name: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct UserDto {
        pub id: i64,
        pub email: String,
        #[serde(default)]
        pub first_name: Option<String>,
        #[serde(default)]
        pub last_name: Option<String>,
        #[serde(default = "default_active")]
        pub is_active: bool,
        #[serde(default)]
        pub inserted_at: Option<String>,
        #[serde(default)]
        pub updated_at: Option<String>,
    }

    fn default_active() -> bool {
        true
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AuthData {
        pub user: UserDto,
        pub token: String,
    }

    /// Body of login, register and refresh responses.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AuthResponse {
        pub data: AuthData,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CurrentUserResponse {
        pub data: UserDto,
    }
}

pub mod skunk {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct SkunkNew {
        pub fished_at: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub latitude: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub longitude: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub notes: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SkunkRequest {
        pub user_skunk: SkunkNew,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SkunkDto {
        pub id: String,
        pub fished_at: String,
        #[serde(default)]
        pub latitude: Option<f64>,
        #[serde(default)]
        pub longitude: Option<f64>,
        #[serde(default)]
        pub notes: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SkunkEnvelope {
        pub user_skunk: SkunkDto,
    }
}
