//! Account settings panel.
//!
//! Seven independent tabs, each with its own save action. There is no step
//! sequencing; a save only touches its own tab and sets the panel message.

pub mod forms;

pub use forms::{PasswordForm, PersonalInfoForm, PreferencesForm, ProfessionalInfoForm, SkillsForm};

use reqwest::multipart::Form;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domain::settings::{
    NotificationSettings, ProfilePictureResponse, ResumeUploadResponse, UpdatePasswordRequest,
};
use crate::domain::UserRecord;
use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;
use crate::wizard::payload::file_part;
use crate::wizard::FileAttachment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsTab {
    Personal,
    Professional,
    Skills,
    Preferences,
    Resume,
    Security,
    Notifications,
}

impl SettingsTab {
    pub const ALL: [Self; 7] = [
        Self::Personal,
        Self::Professional,
        Self::Skills,
        Self::Preferences,
        Self::Resume,
        Self::Security,
        Self::Notifications,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Professional => "professional",
            Self::Skills => "skills",
            Self::Preferences => "preferences",
            Self::Resume => "resume",
            Self::Security => "security",
            Self::Notifications => "notifications",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Personal => "Personal Info",
            Self::Professional => "Professional",
            Self::Skills => "Skills & Certs",
            Self::Preferences => "Job Preferences",
            Self::Resume => "Resume",
            Self::Security => "Security",
            Self::Notifications => "Notifications",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl SettingsMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == MessageKind::Success
    }
}

pub struct SettingsPanel {
    session: Arc<SessionStore>,
    active_tab: SettingsTab,
    loading: bool,
    message: Option<SettingsMessage>,
    pub personal: PersonalInfoForm,
    pub professional: ProfessionalInfoForm,
    pub skills: SkillsForm,
    pub preferences: PreferencesForm,
    pub password: PasswordForm,
    pub notifications: NotificationSettings,
}

impl SettingsPanel {
    pub fn new(session: Arc<SessionStore>) -> Self {
        let mut panel = Self {
            session,
            active_tab: SettingsTab::Personal,
            loading: false,
            message: None,
            personal: PersonalInfoForm::default(),
            professional: ProfessionalInfoForm::default(),
            skills: SkillsForm::default(),
            preferences: PreferencesForm::default(),
            password: PasswordForm::default(),
            notifications: NotificationSettings::default(),
        };
        if let Some(user) = panel.session.current_user() {
            panel.reseed(&user);
        }
        panel
    }

    /// Re-seeds the profile forms after the session user changed.
    /// Password and notification forms are left alone.
    pub fn reseed(&mut self, user: &UserRecord) {
        self.personal = PersonalInfoForm::from_user(user);
        self.professional = ProfessionalInfoForm::from_user(user);
        self.skills = SkillsForm::from_user(user);
        self.preferences = PreferencesForm::from_user(user);
    }

    pub fn active_tab(&self) -> SettingsTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: SettingsTab) {
        self.active_tab = tab;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn message(&self) -> Option<&SettingsMessage> {
        self.message.as_ref()
    }

    fn finish<T>(&mut self, result: ApiResult<T>, success: &str, fallback: &str) -> SettingsMessage {
        self.conclude(result, success, |e| e.user_message(fallback))
    }

    fn conclude<T>(
        &mut self,
        result: ApiResult<T>,
        success: &str,
        error_text: impl FnOnce(&ApiError) -> String,
    ) -> SettingsMessage {
        self.loading = false;
        let message = match result {
            Ok(_) => SettingsMessage::success(success),
            Err(e) => {
                warn!(error = %e, tab = self.active_tab.id(), "Settings update failed");
                SettingsMessage::error(error_text(&e))
            }
        };
        self.message = Some(message.clone());
        message
    }

    async fn put_section<B: Serialize + ?Sized>(
        &mut self,
        path: &str,
        body: &B,
        success: &str,
        fallback: &str,
    ) -> SettingsMessage {
        self.loading = true;
        self.message = None;
        let result = self.session.api().put_json_unit(path, body).await;
        self.finish(result, success, fallback)
    }

    #[instrument(skip(self))]
    pub async fn save_personal(&mut self) -> SettingsMessage {
        let body = self.personal.clone();
        self.put_section(
            "/users/profile/personal",
            &body,
            "Personal information updated successfully!",
            "Failed to update information",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn save_professional(&mut self) -> SettingsMessage {
        let body = self.professional.clone();
        self.put_section(
            "/users/profile/professional",
            &body,
            "Professional information updated successfully!",
            "Failed to update information",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn save_skills(&mut self) -> SettingsMessage {
        let body = self.skills.body();
        self.put_section(
            "/users/profile/skills",
            &body,
            "Skills and certifications updated successfully!",
            "Failed to update information",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn save_preferences(&mut self) -> SettingsMessage {
        let body = self.preferences.body();
        self.put_section(
            "/users/profile/preferences",
            &body,
            "Job preferences updated successfully!",
            "Failed to update preferences",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn save_notifications(&mut self) -> SettingsMessage {
        let body = self.notifications.clone();
        self.put_section(
            "/users/notifications",
            &body,
            "Notification preferences updated!",
            "Failed to update preferences",
        )
        .await
    }

    /// Changes the password. The new password and its confirmation are
    /// checked locally first; the fields are cleared after success.
    #[instrument(skip(self))]
    pub async fn save_password(&mut self) -> SettingsMessage {
        if !self.password.passwords_match() {
            let message = SettingsMessage::error("New passwords do not match");
            self.message = Some(message.clone());
            return message;
        }

        let form = self.password.clone();
        let body = UpdatePasswordRequest {
            current_password: &form.current_password,
            new_password: &form.new_password,
        };
        let message = self
            .put_section(
                "/users/password",
                &body,
                "Password updated successfully!",
                "Failed to update password",
            )
            .await;

        if message.is_success() {
            self.password.clear();
        }
        message
    }

    #[instrument(skip(self, resume), fields(file = %resume.file_name))]
    pub async fn upload_resume(&mut self, resume: FileAttachment) -> SettingsMessage {
        self.loading = true;
        self.message = None;

        let result = self.post_resume(resume).await;
        if let Ok(Some(url)) = &result {
            self.mirror_user(|user| user.resume_url = Some(url.clone()));
        }
        self.finish(result, "Resume uploaded successfully!", "Failed to upload resume")
    }

    async fn post_resume(&self, resume: FileAttachment) -> ApiResult<Option<String>> {
        let form = Form::new().part("resume", file_part(resume)?);
        let response: ResumeUploadResponse =
            self.session.api().post_multipart("/users/resume", form).await?;
        Ok(response.resume_url)
    }

    /// Replaces the profile picture and mirrors the new URL into the session
    /// user.
    #[instrument(skip(self, picture), fields(file = %picture.file_name))]
    pub async fn upload_profile_picture(&mut self, picture: FileAttachment) -> SettingsMessage {
        self.loading = true;

        let result = self.put_picture(picture).await;
        if let Ok(url) = &result {
            self.personal.profile_picture = Some(url.clone());
            self.mirror_user(|user| user.profile_picture_url = Some(url.clone()));
        }
        // Picture failures always show the fixed text.
        self.conclude(result, "Profile picture updated!", |_| {
            "Failed to upload profile picture".to_string()
        })
    }

    async fn put_picture(&self, picture: FileAttachment) -> ApiResult<String> {
        let form = Form::new().part("profilePicture", file_part(picture)?);
        let response: ProfilePictureResponse = self
            .session
            .api()
            .put_multipart("/users/profile/picture", form)
            .await?;
        Ok(response.profile_picture_url)
    }

    #[instrument(skip(self))]
    pub async fn remove_profile_picture(&mut self) -> SettingsMessage {
        self.loading = true;

        let result = self.session.api().delete("/users/profile/picture").await;
        if result.is_ok() {
            self.personal.profile_picture = None;
            self.mirror_user(|user| user.profile_picture_url = None);
        }
        self.conclude(result, "Profile picture removed!", |_| {
            "Failed to remove profile picture".to_string()
        })
    }

    /// Deletes the account and signs out. Confirmation is the caller's job.
    #[instrument(skip(self))]
    pub async fn delete_account(&mut self) -> ApiResult<()> {
        match self.session.api().delete("/users/profile").await {
            Ok(()) => {
                info!("Account deleted");
                self.session.logout();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to delete account");
                self.message = Some(SettingsMessage::error("Failed to delete account"));
                Err(e)
            }
        }
    }

    fn mirror_user(&self, update: impl FnOnce(&mut UserRecord)) {
        if let Some(mut user) = self.session.current_user() {
            update(&mut user);
            self.session.update_user(user);
        }
    }
}
