//! Unified client error handling
//!
//! Every call against the ResuMatch backend resolves to an [`ApiError`].
//! UI-facing code never shows the raw error; it asks for
//! [`ApiError::user_message`] with the fallback text of the operation.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized(Option<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server returned {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid attachment: {0}")]
    Attachment(String),

    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

/// Error body sent by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiError {
    /// Builds the error for a non-2xx response, keeping the server message verbatim.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match (status, message) {
            (StatusCode::UNAUTHORIZED, msg) => Self::Unauthorized(msg),
            (StatusCode::BAD_REQUEST, Some(msg)) => Self::BadRequest(msg),
            (StatusCode::NOT_FOUND, Some(msg)) => Self::NotFound(msg),
            (status, message) => Self::Status { status, message },
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            Self::BadRequest(_) => Some(StatusCode::BAD_REQUEST),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Status { .. } => "HTTP_ERROR",
            Self::Transport(_) => "NETWORK_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Attachment(_) => "ATTACHMENT_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The message the server attached to the failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => Some(msg),
            Self::Unauthorized(message) | Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text shown to the user: the server message when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self.server_message() {
            Some(msg) if !msg.is_empty() => msg.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(StatusCode::UNAUTHORIZED)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
