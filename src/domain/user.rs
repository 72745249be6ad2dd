//! User domain types
//!
//! The server-confirmed user record and the auth payloads that carry it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// User profile as returned by `/users/me`, `/users/login` and `/users/register`.
///
/// The backend returns raw column names, so only the nested JSON documents use
/// camelCase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin_profile: Option<String>,
    #[serde(default)]
    pub portfolio_website: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub years_of_experience: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub current_company: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub professional_summary: Option<String>,
    #[serde(default)]
    pub skills: Option<UserSkills>,
    #[serde(default)]
    pub education: Option<Vec<EducationRecord>>,
    #[serde(default)]
    pub job_preferences: Option<UserJobPreferences>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Splits `name` into first and last name the way the profile forms do:
    /// the first two space-separated words.
    pub fn split_name(&self) -> (String, String) {
        let mut parts = self.name.as_deref().unwrap_or_default().split(' ');
        let first = parts.next().unwrap_or_default().to_string();
        let last = parts.next().unwrap_or_default().to_string();
        (first, last)
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown user")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSkills {
    #[serde(default)]
    pub primary: Vec<String>,
    #[serde(default)]
    pub secondary: Vec<String>,
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<CertificationRecord>,
    #[serde(default)]
    pub languages: Vec<LanguageRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserJobPreferences {
    #[serde(default)]
    pub job_titles: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub work_mode: Vec<String>,
    #[serde(default)]
    pub job_type: Vec<String>,
    #[serde(default)]
    pub salary: Option<SalaryRange>,
    #[serde(default)]
    pub company_size: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub min: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub max: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRecord {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
}

/// Body of a successful login or registration: the bearer token next to the
/// user's columns.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub user: UserRecord,
}

/// Login request
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Registration without attachments
#[derive(Debug, Clone, Serialize)]
pub struct BasicRegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Columns like `years_of_experience` and `id` arrive as either JSON numbers or
/// strings depending on the database driver.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string_or_number(deserializer)?.unwrap_or_default())
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Str(s)) if s.is_empty() => None,
        Some(Raw::Str(s)) => Some(s),
        Some(Raw::Num(n)) => Some(n.to_string()),
        None => None,
    })
}
