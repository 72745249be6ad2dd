//! HTTP client for the ResuMatch backend.
//!
//! Every request carries the stored bearer token when one exists. Any 401
//! response removes the stored token before the error is returned, so the
//! next hydration starts anonymous.

use anyhow::{Context, Result};
use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::services::token_store::TokenStore;

/// Client for the ResuMatch REST API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(base_url: &Url, timeout_seconds: u64, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(base_url = %base_url, "API client initialized");

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token store shared with the session.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, url);

        if let Some(token) = self.tokens.get() {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Sends the request and maps non-2xx responses to [`ApiError`].
    async fn execute(&self, method: Method, path: &str, req: RequestBuilder) -> ApiResult<Response> {
        debug!(%method, path, "API request");

        let response = req.send().await.map_err(|e| {
            error!(error = %e, path, "API request failed");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.message);

        let err = ApiError::from_status(status, message);

        if err.is_unauthorized() {
            warn!(path, "API returned 401, clearing stored token");
            if let Err(e) = self.tokens.remove() {
                error!(error = %e, "Failed to clear stored token");
            }
        } else {
            warn!(status = %status, path, error = %err, "API error");
        }

        Err(err)
    }

    async fn decode<R: DeserializeOwned>(path: &str, response: Response) -> ApiResult<R> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, path, "Failed to parse API response");
            ApiError::Decode(e.to_string())
        })
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        let req = self.request(Method::GET, path);
        let response = self.execute(Method::GET, path, req).await?;
        Self::decode(path, response).await
    }

    pub async fn get_with_query<Q: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> ApiResult<R> {
        let req = self.request(Method::GET, path).query(query);
        let response = self.execute(Method::GET, path, req).await?;
        Self::decode(path, response).await
    }

    pub async fn post_json<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> ApiResult<R> {
        let req = self.request(Method::POST, path).json(body);
        let response = self.execute(Method::POST, path, req).await?;
        Self::decode(path, response).await
    }

    /// POST with a JSON body whose response body is not needed.
    pub async fn post_json_unit<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> ApiResult<()> {
        let req = self.request(Method::POST, path).json(body);
        self.execute(Method::POST, path, req).await.map(drop)
    }

    pub async fn put_json_unit<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> ApiResult<()> {
        let req = self.request(Method::PUT, path).json(body);
        self.execute(Method::PUT, path, req).await.map(drop)
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let req = self.request(Method::DELETE, path);
        self.execute(Method::DELETE, path, req).await.map(drop)
    }

    pub async fn post_multipart<R: DeserializeOwned>(&self, path: &str, form: Form) -> ApiResult<R> {
        let req = self.request(Method::POST, path).multipart(form);
        let response = self.execute(Method::POST, path, req).await?;
        Self::decode(path, response).await
    }

    pub async fn put_multipart<R: DeserializeOwned>(&self, path: &str, form: Form) -> ApiResult<R> {
        let req = self.request(Method::PUT, path).multipart(form);
        let response = self.execute(Method::PUT, path, req).await?;
        Self::decode(path, response).await
    }
}

/// Path prefixes that require a session.
pub const PROTECTED_PATHS: [&str; 6] = [
    "/dashboard",
    "/profile",
    "/resume",
    "/applications",
    "/settings",
    "/admin",
];

/// Whether a UI sitting on `current_path` should navigate to `/login` after a
/// 401 from the request to `request_path`.
///
/// Login attempts and the login page itself never redirect, and public pages
/// stay put.
pub fn should_redirect_to_login(current_path: &str, request_path: &str) -> bool {
    let is_login_request = request_path.contains("/users/login");
    let is_login_page = current_path == "/login";
    let is_protected = current_path == "/jobs/saved"
        || PROTECTED_PATHS.iter().any(|p| current_path.starts_with(p));

    is_protected && !is_login_request && !is_login_page
}
