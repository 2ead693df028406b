mod common;

use std::sync::Arc;

use common::{MockResponse, auth_json, harness};
use data::AuthRepositoryImpl;
use domain::{AuthRepository, LoginCredentials, RegisterCredentials, TokenStorage, UserEntity};

fn repository(h: &common::Harness) -> AuthRepositoryImpl {
    let tokens: Arc<dyn TokenStorage> = h.tokens.clone();
    AuthRepositoryImpl::new(h.api.clone(), tokens)
}

fn credentials() -> LoginCredentials {
    LoginCredentials {
        email: "ada@example.com".to_string(),
        password: "secret1".to_string(),
    }
}

#[tokio::test]
async fn login_stores_session_without_sending_bearer() {
    let h = harness().await;
    let repo = repository(&h);
    h.tokens.save_token("stale").await.unwrap();

    h.backend.enqueue(MockResponse::json(&auth_json("fresh"))).await;
    let user = repo.login(credentials()).await.unwrap();

    assert_eq!(user.username, "Ada Lovelace");
    assert_eq!(user.id, "12");
    assert_eq!(user.token.as_deref(), Some("fresh"));
    assert_eq!(h.tokens.token().await.unwrap().as_deref(), Some("fresh"));

    let request = &h.backend.captured().await[0];
    assert_eq!(request.path, "/auth/login");
    assert_eq!(request.header("authorization"), None);
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["password"], "secret1");
}

#[tokio::test]
async fn login_failure_reports_backend_message() {
    let h = harness().await;
    let repo = repository(&h);

    h.backend
        .enqueue(MockResponse::status(
            401,
            r#"{"error": "invalid_credentials", "message": "Invalid email or password"}"#,
        ))
        .await;
    let err = repo.login(credentials()).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");
    assert_eq!(h.tokens.token().await.unwrap(), None);
}

#[tokio::test]
async fn register_wraps_user_payload() {
    let h = harness().await;
    let repo = repository(&h);

    h.backend.enqueue(MockResponse::json(&auth_json("t1"))).await;
    repo.register(RegisterCredentials {
        email: "ada@example.com".to_string(),
        password: "secret1".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
    })
    .await
    .unwrap();

    let request = &h.backend.captured().await[0];
    assert_eq!(request.path, "/auth/register");
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["user"]["first_name"], "Ada");
    assert_eq!(body["user"]["last_name"], "Lovelace");
}

#[tokio::test]
async fn register_validation_details_are_flattened() {
    let h = harness().await;
    let repo = repository(&h);

    h.backend
        .enqueue(MockResponse::status(
            422,
            r#"{"error": "validation_failed", "message": "Registration failed", "details": {"email": ["has already been taken"]}}"#,
        ))
        .await;
    let err = repo
        .register(RegisterCredentials {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Registration failed - email: has already been taken"
    );
}

#[tokio::test]
async fn current_user_is_read_from_storage() {
    let h = harness().await;
    let repo = repository(&h);
    let stored = UserEntity {
        id: "12".to_string(),
        email: "ada@example.com".to_string(),
        username: "Ada Lovelace".to_string(),
        token: Some("tok".to_string()),
    };
    h.tokens
        .save_user(&serde_json::to_string(&stored).unwrap())
        .await
        .unwrap();

    assert_eq!(repo.current_user().await.unwrap(), Some(stored));
    assert!(repo.is_logged_in().await);
    assert!(h.backend.captured().await.is_empty());
}

#[tokio::test]
async fn unreadable_user_is_fetched_with_token() {
    let h = harness().await;
    let repo = repository(&h);
    h.tokens.save_token("tok").await.unwrap();
    h.tokens.save_user("garbage").await.unwrap();

    h.backend
        .enqueue(MockResponse::json(
            r#"{"data": {"id": 12, "email": "ada@example.com", "first_name": "Ada", "last_name": null}}"#,
        ))
        .await;
    let user = repo.current_user().await.unwrap().unwrap();
    assert_eq!(user.username, "Ada");

    let request = &h.backend.captured().await[0];
    assert_eq!(request.path, "/auth/me");
    assert_eq!(request.header("authorization"), Some("Bearer tok"));
    let stored: UserEntity =
        serde_json::from_str(&h.tokens.user().await.unwrap().unwrap()).unwrap();
    assert_eq!(stored, user);
}

#[tokio::test]
async fn rejected_session_is_cleared() {
    let h = harness().await;
    let repo = repository(&h);
    h.tokens.save_token("expired").await.unwrap();

    h.backend.enqueue(MockResponse::error(401, "expired")).await;
    assert!(repo.current_user().await.is_err());
    assert_eq!(h.tokens.token().await.unwrap(), None);
    assert!(!repo.is_logged_in().await);
}

#[tokio::test]
async fn no_session_means_no_user() {
    let h = harness().await;
    let repo = repository(&h);
    assert_eq!(repo.current_user().await.unwrap(), None);
    assert!(!repo.is_logged_in().await);
}

#[tokio::test]
async fn refresh_requires_a_token() {
    let h = harness().await;
    let repo = repository(&h);
    let err = repo.refresh_token().await.unwrap_err();
    assert_eq!(err.to_string(), "No token available");
}

#[tokio::test]
async fn refresh_rotates_token() {
    let h = harness().await;
    let repo = repository(&h);
    h.tokens.save_token("old").await.unwrap();

    h.backend.enqueue(MockResponse::json(&auth_json("new"))).await;
    repo.refresh_token().await.unwrap();

    let request = &h.backend.captured().await[0];
    assert_eq!(request.path, "/auth/refresh");
    assert_eq!(request.header("authorization"), Some("Bearer old"));
    assert_eq!(h.tokens.token().await.unwrap().as_deref(), Some("new"));
}

#[tokio::test]
async fn failed_refresh_clears_session() {
    let h = harness().await;
    let repo = repository(&h);
    h.tokens.save_token("old").await.unwrap();
    h.tokens.save_user("{}").await.unwrap();

    h.backend.enqueue(MockResponse::error(401, "expired")).await;
    assert!(repo.refresh_token().await.is_err());
    assert_eq!(h.tokens.token().await.unwrap(), None);
    assert_eq!(h.tokens.user().await.unwrap(), None);
}

#[tokio::test]
async fn logout_clears_session() {
    let h = harness().await;
    let repo = repository(&h);
    h.tokens.save_token("tok").await.unwrap();
    h.tokens.save_user("{}").await.unwrap();

    repo.logout().await.unwrap();
    assert_eq!(h.tokens.token().await.unwrap(), None);
    assert_eq!(h.tokens.user().await.unwrap(), None);
}
