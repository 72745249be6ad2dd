//! In-process stub of the ResuMatch backend.
//!
//! Every request is recorded (including multipart parts) and answered from a
//! table of canned responses keyed by `"METHOD /path"`, with the `/api`
//! prefix stripped. Unknown routes answer 404.

#![allow(dead_code)]

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use resumatch::services::{ApiClient, MemoryTokenStore, TokenStore};
use resumatch::SessionStore;

pub const TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
pub struct RecordedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedPart {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub json: Option<Value>,
    pub parts: Vec<RecordedPart>,
}

impl RecordedRequest {
    pub fn part(&self, name: &str) -> Option<&RecordedPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }
}

#[derive(Clone, Default)]
pub struct StubBackend {
    responses: Arc<Mutex<HashMap<String, (StatusCode, Value)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// When set, every route except login and register demands this token.
    required_token: Arc<Mutex<Option<String>>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, route: &str, status: StatusCode, body: Value) -> &Self {
        self.responses
            .lock()
            .insert(route.to_string(), (status, body));
        self
    }

    pub fn require_token(&self, token: &str) -> &Self {
        *self.required_token.lock() = Some(token.to_string());
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn requests_to(&self, route: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| format!("{} {}", r.method, r.path) == route)
            .collect()
    }

    pub async fn spawn(&self) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend address");
        let app = Router::new().fallback(handle).with_state(self.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub backend");
        });

        Url::parse(&format!("http://{addr}/api")).expect("stub url")
    }
}

async fn handle(State(stub): State<StubBackend>, req: Request) -> Response {
    let method = req.method().to_string();
    let path = req
        .uri()
        .path()
        .strip_prefix("/api")
        .unwrap_or(req.uri().path())
        .to_string();
    let query = req.uri().query().map(str::to_string);
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let mut parts = Vec::new();
    let mut body_json = None;
    if is_multipart {
        let mut multipart = Multipart::from_request(req, &()).await.expect("multipart");
        while let Some(field) = multipart.next_field().await.expect("multipart field") {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let body = field.bytes().await.expect("field bytes").to_vec();
            parts.push(RecordedPart {
                name,
                file_name,
                content_type,
                body,
            });
        }
    } else {
        let bytes = axum::body::to_bytes(req.into_body(), usize::MAX)
            .await
            .expect("request body");
        if !bytes.is_empty() {
            body_json = serde_json::from_slice(&bytes).ok();
        }
    }

    stub.requests.lock().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query,
        authorization: authorization.clone(),
        json: body_json,
        parts,
    });

    let public = path == "/users/login" || path == "/users/register";
    if let Some(token) = stub.required_token.lock().clone() {
        let expected = format!("Bearer {token}");
        if !public && authorization.as_deref() != Some(expected.as_str()) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Not authorized, token failed" })),
            )
                .into_response();
        }
    }

    let route = format!("{method} {path}");
    let (status, body) = stub
        .responses
        .lock()
        .get(&route)
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, json!({ "message": "Not found" })));

    (status, Json(body)).into_response()
}

pub fn user_json() -> Value {
    json!({
        "id": 17,
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "phone": "555-0100",
        "location": "London",
        "job_title": "Analyst",
        "years_of_experience": 7,
        "skills": { "primary": ["Mathematics"], "languages": [] },
        "job_preferences": { "jobTitles": ["Mathematician"], "workMode": ["Remote"] }
    })
}

pub fn client(url: &Url, tokens: Arc<dyn TokenStore>) -> ApiClient {
    ApiClient::new(url, 5, tokens).expect("api client")
}

/// A session with no stored token.
pub fn anonymous_session(url: &Url) -> (Arc<SessionStore>, Arc<MemoryTokenStore>) {
    let tokens = Arc::new(MemoryTokenStore::new());
    (SessionStore::new(client(url, tokens.clone())), tokens)
}

/// A session hydrated from a stored token against `GET /users/me`.
pub async fn signed_in_session(stub: &StubBackend, url: &Url) -> Arc<SessionStore> {
    stub.respond("GET /users/me", StatusCode::OK, user_json());
    let tokens = Arc::new(MemoryTokenStore::with_token(TOKEN));
    let session = SessionStore::new(client(url, tokens));
    session.hydrate().await;
    assert!(session.is_authenticated(), "stub session should hydrate");
    session
}
