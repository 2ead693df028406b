//! HTTP client for the Hooked backend.
//!
//! Every call logs `→ METHOD /path` before sending and `← status` after.
//! A stored session token is attached as `Authorization: Bearer <token>` to
//! every request except login and registration.

mod auth;
mod catches;
mod skunks;

use std::{sync::Arc, time::Duration};

use api_types::ErrorBody;
use domain::{NetworkError, TokenStorage};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

const PUBLIC_PATHS: [&str; 2] = ["auth/login", "auth/register"];

/// How a non-2xx body is turned into a message.
#[derive(Clone, Copy, Debug)]
enum ErrorStyle {
    /// `[404 Not Found] <raw body>`.
    Raw,
    /// The `message`/`details` of an [`ErrorBody`], raw otherwise.
    Detailed,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStorage>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        tokens: Arc<dyn TokenStorage>,
    ) -> Result<Self, NetworkError> {
        reqwest::Url::parse(base_url)
            .map_err(|err| NetworkError::Request(format!("invalid base_url: {err}")))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| NetworkError::Request(err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        if PUBLIC_PATHS.iter().any(|public| path.contains(public)) {
            return builder;
        }
        match self.tokens.token().await {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(err) => {
                tracing::warn!("cannot read session token: {err}");
                builder
            }
        }
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        builder: RequestBuilder,
        style: ErrorStyle,
    ) -> Result<Response, NetworkError> {
        tracing::debug!("→ {method} /{}", path.trim_start_matches('/'));
        let res = builder.send().await.map_err(|err| {
            tracing::error!("{method} /{path} failed: {err}");
            NetworkError::Transport(err.to_string())
        })?;

        let status = res.status();
        tracing::info!("← {status}");
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        let err = error_for(status, body, style);
        tracing::error!("{method} /{path}: {err}");
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, NetworkError> {
        let builder = self.request(Method::GET, path).await;
        let res = self.send(&Method::GET, path, builder, ErrorStyle::Raw).await?;
        decode(res).await
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, NetworkError> {
    res.json::<T>()
        .await
        .map_err(|err| NetworkError::Decode(err.to_string()))
}

fn error_for(status: StatusCode, body: String, style: ErrorStyle) -> NetworkError {
    if let ErrorStyle::Detailed = style
        && let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body)
    {
        return NetworkError::Rejected {
            status: status.as_u16(),
            message: parsed.detailed_message(),
        };
    }
    NetworkError::Http {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        body,
    }
}
