//! Mock Hooked backend plus helpers shared by the data layer tests.

#![allow(dead_code)]

use std::{collections::VecDeque, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, Response, StatusCode},
    routing::any,
};
use data::{ApiClient, CatchCache, InMemoryTokenStorage};
use domain::TokenStorage;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use tokio::{net::TcpListener, sync::Mutex};

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self::status(status, &format!(r#"{{"error": "{message}"}}"#))
    }
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
}

pub struct MockBackend {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState {
            requests: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(VecDeque::new())),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/{*path}", any(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    pub async fn enqueue(&self, resp: MockResponse) {
        self.state.responses.lock().await.push_back(resp);
    }

    pub async fn captured(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().await.clone()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_request(State(state): State<MockState>, req: Request<Body>) -> Response<Body> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let headers = req
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();
    let body = axum::body::to_bytes(req.into_body(), 4 * 1024 * 1024)
        .await
        .unwrap_or_default()
        .to_vec();

    state.requests.lock().await.push(CapturedRequest {
        method,
        path,
        headers,
        body,
    });

    let mock = state
        .responses
        .lock()
        .await
        .pop_front()
        .unwrap_or_else(|| MockResponse::error(500, "no response queued"));

    Response::builder()
        .status(StatusCode::from_u16(mock.status).unwrap())
        .header("content-type", "application/json")
        .body(Body::from(mock.body))
        .unwrap()
}

pub async fn database() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

pub struct Harness {
    pub backend: MockBackend,
    pub tokens: Arc<InMemoryTokenStorage>,
    pub api: ApiClient,
    pub cache: CatchCache,
}

pub async fn harness() -> Harness {
    let backend = MockBackend::start().await;
    let tokens = Arc::new(InMemoryTokenStorage::new());
    let storage: Arc<dyn TokenStorage> = tokens.clone();
    let api = ApiClient::new(&backend.base_url(), Duration::from_secs(5), storage).unwrap();
    let cache = CatchCache::new(database().await);
    Harness {
        backend,
        tokens,
        api,
        cache,
    }
}

pub fn catch_json(id: &str, species: &str, caught_at: &str) -> String {
    format!(
        r#"{{
            "id": "{id}",
            "species": "{species}",
            "location": "Lake Erie",
            "latitude": 41.7,
            "longitude": -81.6,
            "caught_at": "{caught_at}",
            "notes": null,
            "weight": 3.5,
            "length": 18.0,
            "weather_data": {{"temp_c": 21}},
            "image_url": "https://cdn.example.com/{id}.jpg",
            "inserted_at": "{caught_at}",
            "updated_at": "{caught_at}"
        }}"#
    )
}

pub fn catch_list_json(catches: &[String]) -> String {
    format!(r#"{{"user_catches": [{}]}}"#, catches.join(","))
}

pub fn auth_json(token: &str) -> String {
    format!(
        r#"{{"data": {{
            "user": {{"id": 12, "email": "ada@example.com", "first_name": "Ada", "last_name": "Lovelace", "is_active": true}},
            "token": "{token}"
        }}}}"#
    )
}
