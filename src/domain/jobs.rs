//! Job and application domain types
//!
//! Jobs come from the job-search proxy and are stored verbatim when saved, so
//! unknown fields are kept in `extra` and sent back unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A job listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<JobCompany>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<NamedValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<NamedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Job {
    pub fn company_name(&self) -> Option<&str> {
        self.company.as_ref().and_then(|c| c.name.as_deref())
    }

    /// First listed location, "Remote" when none is given.
    pub fn primary_location(&self) -> &str {
        self.locations
            .first()
            .map(|l| l.name.as_str())
            .unwrap_or("Remote")
    }
}

/// Job id as the listing provider sent it, number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Number(serde_json::Number),
    Text(String),
}

impl Default for JobId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq<str> for JobId {
    fn eq(&self, other: &str) -> bool {
        match self {
            Self::Number(n) => n.to_string() == other,
            Self::Text(s) => s == other,
        }
    }
}

impl PartialEq<&str> for JobId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobCompany {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    #[serde(default)]
    pub name: String,
}

/// Application status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interviewing,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [Self; 4] = [
        Self::Applied,
        Self::Interviewing,
        Self::Accepted,
        Self::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Interviewing => "Interviewing",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }

    /// Lenient parse: case-insensitive, anything unknown reads as `Applied`.
    pub fn from_lenient(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .unwrap_or_default()
    }

    /// Lowercase key used by the `status` query filter.
    pub fn filter_key(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApplicationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Self::from_lenient(&s)).unwrap_or_default())
    }
}

/// A tracked job application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, alias = "job_id")]
    pub job_id: Option<String>,
    #[serde(default, alias = "job_title")]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for applying to a job
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub job_id: String,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: String,
    pub status: ApplicationStatus,
}

impl NewApplication {
    /// Application for `job` in the initial `Applied` state.
    pub fn for_job(job: &Job) -> Self {
        Self {
            job_id: job.id.to_string(),
            job_title: job.name.clone(),
            company: job.company_name().map(str::to_string),
            location: job.primary_location().to_string(),
            status: ApplicationStatus::Applied,
        }
    }
}

/// Request body for `PUT /applications/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct UpdateApplicationStatus {
    pub status: ApplicationStatus,
}

/// Response of `GET /jobs/{id}/saved`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedStatus {
    #[serde(default, alias = "saved")]
    pub is_saved: bool,
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}
