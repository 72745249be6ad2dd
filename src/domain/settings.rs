//! User settings domain types
//!
//! Notification preferences and password change payloads.

use serde::{Deserialize, Serialize};

/// Notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub email_notifications: bool,
    #[serde(default = "default_true")]
    pub job_alerts: bool,
    #[serde(default = "default_true")]
    pub application_updates: bool,
    #[serde(default)]
    pub weekly_digest: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            job_alerts: true,
            application_updates: true,
            weekly_digest: false,
        }
    }
}

/// Request DTO for `PUT /users/password`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

/// Response of `PUT /users/profile/picture`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePictureResponse {
    pub profile_picture_url: String,
}

/// Response of `POST /users/resume`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUploadResponse {
    #[serde(default, alias = "resume_url")]
    pub resume_url: Option<String>,
}
