mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

use helpers::{anonymous_session, client, signed_in_session, user_json, StubBackend, TOKEN};
use resumatch::services::{FileTokenStore, MemoryTokenStore, TokenStore};
use resumatch::{SessionState, SessionStore};

#[tokio::test]
async fn test_hydrate_attaches_bearer_token() {
    let stub = StubBackend::new();
    stub.require_token(TOKEN);
    let url = stub.spawn().await;

    let session = signed_in_session(&stub, &url).await;

    let user = session.current_user().unwrap();
    assert_eq!(user.id, "17");
    assert_eq!(user.years_of_experience.as_deref(), Some("7"));

    let request = &stub.requests_to("GET /users/me")[0];
    assert_eq!(request.authorization.as_deref(), Some("Bearer test-token"));
}

#[tokio::test]
async fn test_rejected_token_is_removed_from_disk() {
    let stub = StubBackend::new();
    stub.require_token("a-different-token");
    let url = stub.spawn().await;

    let dir = tempfile::tempdir().unwrap();
    let tokens = Arc::new(FileTokenStore::new(dir.path().join("session.json")));
    tokens.set("stale-token").unwrap();

    let session = SessionStore::new(client(&url, tokens.clone()));
    assert!(session.is_loading());

    assert_eq!(session.hydrate().await, SessionState::Anonymous);
    assert!(tokens.get().is_none());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_hydrate_without_token_skips_request() {
    let stub = StubBackend::new();
    let url = stub.spawn().await;
    let (session, _) = anonymous_session(&url);

    assert_eq!(session.hydrate().await, SessionState::Anonymous);
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_login_persists_token() {
    let stub = StubBackend::new();
    let mut body = user_json();
    body["token"] = json!(TOKEN);
    stub.respond("POST /users/login", StatusCode::OK, body);
    let url = stub.spawn().await;
    let (session, tokens) = anonymous_session(&url);

    let user = session.login("ada@example.com", "difference-engine").await.unwrap();
    assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    assert_eq!(tokens.get().as_deref(), Some(TOKEN));

    let request = &stub.requests_to("POST /users/login")[0];
    assert_eq!(
        request.json,
        Some(json!({ "email": "ada@example.com", "password": "difference-engine" }))
    );
}

#[tokio::test]
async fn test_login_without_token_is_an_error() {
    let stub = StubBackend::new();
    stub.respond("POST /users/login", StatusCode::OK, user_json());
    let url = stub.spawn().await;
    let (session, tokens) = anonymous_session(&url);

    let err = session.login("ada@example.com", "pw").await.unwrap_err();
    assert!(err.to_string().contains("No authentication token received"));
    assert!(!session.is_authenticated());
    assert!(tokens.get().is_none());
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message() {
    let stub = StubBackend::new();
    stub.respond(
        "POST /users/login",
        StatusCode::UNAUTHORIZED,
        json!({ "message": "Invalid email or password" }),
    );
    let url = stub.spawn().await;
    let (session, _) = anonymous_session(&url);

    let err = session.login("ada@example.com", "wrong").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message("Failed to login"), "Invalid email or password");
}

#[tokio::test]
async fn test_register_basic_sends_json() {
    let stub = StubBackend::new();
    let mut body = user_json();
    body["token"] = json!(TOKEN);
    stub.respond("POST /users/register", StatusCode::CREATED, body);
    let url = stub.spawn().await;
    let (session, _) = anonymous_session(&url);

    session
        .register_basic("Ada", "Lovelace", "ada@example.com", "difference-engine")
        .await
        .unwrap();

    let request = &stub.requests_to("POST /users/register")[0];
    assert_eq!(
        request.json,
        Some(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "difference-engine"
        }))
    );
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_any_401_clears_token() {
    let stub = StubBackend::new();
    let url = stub.spawn().await;
    let session = signed_in_session(&stub, &url).await;

    stub.respond(
        "GET /jobs/saved",
        StatusCode::UNAUTHORIZED,
        json!({ "message": "Token expired" }),
    );
    let err = session
        .api()
        .get::<Vec<serde_json::Value>>("/jobs/saved")
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(session.api().tokens().get().is_none());
}

#[tokio::test]
async fn test_forgot_password_posts_email() {
    let stub = StubBackend::new();
    stub.respond(
        "POST /auth/forgot-password",
        StatusCode::OK,
        json!({ "message": "Email sent" }),
    );
    let url = stub.spawn().await;
    let (session, _) = anonymous_session(&url);

    session.forgot_password("ada@example.com").await.unwrap();
    let request = &stub.requests_to("POST /auth/forgot-password")[0];
    assert_eq!(request.json, Some(json!({ "email": "ada@example.com" })));
}

#[tokio::test]
async fn test_logout_then_hydrate_is_anonymous() {
    let stub = StubBackend::new();
    let url = stub.spawn().await;
    let tokens = Arc::new(MemoryTokenStore::with_token(TOKEN));
    stub.respond("GET /users/me", StatusCode::OK, user_json());
    let session = SessionStore::new(client(&url, tokens.clone()));
    session.hydrate().await;
    assert!(session.is_authenticated());

    session.logout();
    assert!(tokens.get().is_none());
    assert_eq!(session.hydrate().await, SessionState::Anonymous);
    assert_eq!(stub.requests_to("GET /users/me").len(), 1);
}
