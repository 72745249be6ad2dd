//! Domain types and DTOs
//!
//! Wire-level shapes exchanged with the ResuMatch backend.

pub mod jobs;
pub mod options;
pub mod settings;
pub mod user;

// Re-export commonly used types
pub use jobs::{Application, ApplicationStatus, Job, JobId, NewApplication};
pub use options::*;
pub use settings::NotificationSettings;
pub use user::{AuthResponse, CertificationRecord, EducationRecord, LanguageRecord, UserRecord};
