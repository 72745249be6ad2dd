//! Registration draft.
//!
//! One sub-struct per wizard step so each step's validation sees only its own
//! fields. The draft lives in memory only and is never persisted.

use std::path::Path;

use crate::domain::{
    CompanySize, ExperienceLevel, Industry, JobType, SalaryCurrency, WorkMode, YearsOfExperience,
};
use crate::error::{ApiError, ApiResult};
use crate::wizard::tags::{
    CertificationInput, EducationInput, LanguageInput, RecordEditor, SelectionSet, TagEditor,
};

/// A file picked by the user, held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FileAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAttachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FileAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, deriving the content type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::Attachment(format!("{} has no file name", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;

        Ok(Self {
            content_type: content_type_for(&file_name).to_string(),
            file_name,
            bytes,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Content type for the extensions the upload fields accept.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Step 1: Basic Information
#[derive(Debug, Clone, Default)]
pub struct BasicInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
    pub profile_picture: Option<FileAttachment>,
    pub password: String,
    pub confirm_password: String,
    /// Terms of Services checkbox. Gates step 1 but is never transmitted.
    pub agreed_to_terms: bool,
}

impl BasicInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Step 2: Professional Background
#[derive(Debug, Clone, Default)]
pub struct ProfessionalInfo {
    pub job_title: String,
    pub years_of_experience: Option<YearsOfExperience>,
    pub experience_level: Option<ExperienceLevel>,
    pub current_company: String,
    pub industry: String,
    pub professional_summary: String,
}

/// Step 3: Skills & Qualifications
#[derive(Debug, Clone, Default)]
pub struct SkillsInfo {
    pub primary_skills: TagEditor,
    pub secondary_skills: TagEditor,
    pub technical_skills: TagEditor,
    pub soft_skills: TagEditor,
    pub certifications: RecordEditor<CertificationInput>,
    pub languages: RecordEditor<LanguageInput>,
    pub education: RecordEditor<EducationInput>,
}

/// Step 4: Job Preferences
#[derive(Debug, Clone, Default)]
pub struct JobPreferences {
    pub desired_job_titles: TagEditor,
    pub preferred_locations: TagEditor,
    pub work_mode: SelectionSet<WorkMode>,
    pub job_type: SelectionSet<JobType>,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    pub salary_currency: SalaryCurrency,
    pub company_size: SelectionSet<CompanySize>,
    pub preferred_industries: SelectionSet<Industry>,
}

/// Step 5: Resume
#[derive(Debug, Clone, Default)]
pub struct ResumeUpload {
    pub resume: Option<FileAttachment>,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationDraft {
    pub basic: BasicInfo,
    pub professional: ProfessionalInfo,
    pub skills: SkillsInfo,
    pub preferences: JobPreferences,
    pub resume: ResumeUpload,
}

impl RegistrationDraft {
    pub fn new() -> Self {
        Self::default()
    }
}
