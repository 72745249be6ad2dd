//! Session and profile store.
//!
//! Holds the authenticated user for whatever owns the wizard, the settings
//! panel and the job board. It is passed around explicitly (usually as an
//! `Arc<SessionStore>`); nothing looks it up ambiently.
//!
//! Lifecycle: `Uninitialized → Hydrating → Authenticated | Anonymous`.
//! Hydration is only attempted when a token is persisted.

use parking_lot::RwLock;
use reqwest::multipart::Form;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domain::user::{AuthResponse, BasicRegistrationRequest, LoginRequest, UserRecord};
use crate::error::{ApiError, ApiResult};
use crate::services::{ApiClient, TokenStore};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Uninitialized,
    Hydrating,
    Authenticated(UserRecord),
    Anonymous,
}

pub struct SessionStore {
    api: ApiClient,
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new(api: ApiClient) -> Arc<Self> {
        Arc::new(Self {
            api,
            state: RwLock::new(SessionState::Uninitialized),
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn tokens(&self) -> &Arc<dyn TokenStore> {
        self.api.tokens()
    }

    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    /// True while a persisted token exists but has not been checked yet.
    pub fn is_loading(&self) -> bool {
        match &*self.state.read() {
            SessionState::Hydrating => true,
            SessionState::Uninitialized => self.tokens().get().is_some(),
            _ => false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(&*self.state.read(), SessionState::Authenticated(_))
    }

    pub fn current_user(&self) -> Option<UserRecord> {
        match &*self.state.read() {
            SessionState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    /// Resolves the persisted token, if any, into an authenticated user.
    ///
    /// An invalid token is removed and the session becomes anonymous; this
    /// never fails.
    #[instrument(skip(self))]
    pub async fn hydrate(&self) -> SessionState {
        if self.tokens().get().is_none() {
            *self.state.write() = SessionState::Anonymous;
            return SessionState::Anonymous;
        }

        *self.state.write() = SessionState::Hydrating;

        let next = match self.api.get::<UserRecord>("/users/me").await {
            Ok(user) => {
                info!(user_id = %user.id, "Session restored");
                SessionState::Authenticated(user)
            }
            Err(e) => {
                warn!(error = %e, "Stored session rejected");
                if let Err(e) = self.tokens().remove() {
                    warn!(error = %e, "Failed to clear stored token");
                }
                SessionState::Anonymous
            }
        };

        *self.state.write() = next.clone();
        next
    }

    /// Submits a multipart registration and signs the new user in.
    #[instrument(skip(self, form))]
    pub async fn register(&self, form: Form) -> ApiResult<UserRecord> {
        let response: AuthResponse = self.api.post_multipart("/users/register", form).await?;
        self.accept(response, "registration")
    }

    /// Registration without profile data or attachments.
    #[instrument(skip(self, password))]
    pub async fn register_basic(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<UserRecord> {
        let body = BasicRegistrationRequest {
            name: format!("{first_name} {last_name}"),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.api.post_json("/users/register", &body).await?;
        self.accept(response, "registration")
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<UserRecord> {
        let response: AuthResponse = self
            .api
            .post_json("/users/login", &LoginRequest { email, password })
            .await?;
        self.accept(response, "login")
    }

    pub fn logout(&self) {
        if let Err(e) = self.tokens().remove() {
            warn!(error = %e, "Failed to clear stored token");
        }
        *self.state.write() = SessionState::Anonymous;
        info!("Signed out");
    }

    /// Replaces the in-memory user after a profile change.
    pub fn update_user(&self, user: UserRecord) {
        let mut state = self.state.write();
        if matches!(&*state, SessionState::Authenticated(_)) {
            *state = SessionState::Authenticated(user);
        } else {
            warn!("Ignoring user update without an authenticated session");
        }
    }

    /// Asks the backend to send a password reset email.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<()> {
        self.api
            .post_json_unit("/auth/forgot-password", &serde_json::json!({ "email": email }))
            .await
    }

    fn accept(&self, response: AuthResponse, flow: &str) -> ApiResult<UserRecord> {
        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Decode("No authentication token received".to_string()))?;

        self.tokens().set(&token)?;
        *self.state.write() = SessionState::Authenticated(response.user.clone());
        info!(user_id = %response.user.id, flow, "Signed in");

        Ok(response.user)
    }
}
