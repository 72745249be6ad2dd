//! Draft files for the command-line front end.
//!
//! A draft file is a JSON document using the same field names as the
//! registration payload. Values are fed through the same editors the
//! interactive flow uses, so duplicates and incomplete records are dropped
//! exactly as they would be by hand. Attachment paths are resolved relative
//! to the draft file.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::domain::{
    CompanySize, ExperienceLevel, Industry, JobType, Proficiency, SalaryCurrency, WorkMode,
    YearsOfExperience,
};
use crate::wizard::draft::{FileAttachment, RegistrationDraft};
use crate::wizard::tags::{
    CertificationInput, EducationInput, LanguageInput, RecordEditor, StagedRecord, TagEditor,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftFile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
    pub profile_picture: Option<PathBuf>,
    pub password: String,
    pub confirm_password: String,
    pub agreed_to_terms: bool,

    pub job_title: String,
    pub years_of_experience: Option<YearsOfExperience>,
    pub experience_level: Option<ExperienceLevel>,
    pub current_company: String,
    pub industry: String,
    pub professional_summary: String,

    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub certifications: Vec<CertificationEntry>,
    pub languages: Vec<LanguageEntry>,
    pub education: Vec<EducationEntry>,

    pub desired_job_titles: Vec<String>,
    pub preferred_locations: Vec<String>,
    pub work_mode: Vec<WorkMode>,
    pub job_type: Vec<JobType>,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    pub salary_currency: SalaryCurrency,
    pub company_size: Vec<CompanySize>,
    pub preferred_industries: Vec<Industry>,

    pub resume: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub name: String,
    pub organization: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LanguageEntry {
    pub language: String,
    pub proficiency: Option<Proficiency>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

impl DraftFile {
    pub async fn read(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read draft file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse draft file {}", path.display()))
    }

    /// Reads a draft file and loads its attachments.
    pub async fn load(path: &Path) -> anyhow::Result<RegistrationDraft> {
        let file = Self::read(path).await?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        file.into_draft(base).await
    }

    pub async fn into_draft(self, base: &Path) -> anyhow::Result<RegistrationDraft> {
        let mut draft = RegistrationDraft::new();

        let basic = &mut draft.basic;
        basic.first_name = self.first_name;
        basic.last_name = self.last_name;
        basic.email = self.email;
        basic.phone = self.phone;
        basic.location = self.location;
        basic.linkedin = self.linkedin;
        basic.portfolio = self.portfolio;
        basic.password = self.password;
        basic.confirm_password = self.confirm_password;
        basic.agreed_to_terms = self.agreed_to_terms;
        basic.profile_picture = attach(base, self.profile_picture.as_deref()).await?;

        let professional = &mut draft.professional;
        professional.job_title = self.job_title;
        professional.years_of_experience = self.years_of_experience;
        professional.experience_level = self.experience_level;
        professional.current_company = self.current_company;
        professional.industry = self.industry;
        professional.professional_summary = self.professional_summary;

        let skills = &mut draft.skills;
        fill_tags(&mut skills.primary_skills, self.primary_skills);
        fill_tags(&mut skills.secondary_skills, self.secondary_skills);
        fill_tags(&mut skills.technical_skills, self.technical_skills);
        fill_tags(&mut skills.soft_skills, self.soft_skills);
        fill_records(
            &mut skills.certifications,
            self.certifications.into_iter().map(|c| CertificationInput {
                name: c.name,
                organization: c.organization,
                date: c.date,
            }),
        );
        fill_records(
            &mut skills.languages,
            self.languages.into_iter().map(|l| LanguageInput {
                language: l.language,
                proficiency: l.proficiency,
            }),
        );
        fill_records(
            &mut skills.education,
            self.education.into_iter().map(|e| EducationInput {
                degree: e.degree,
                institution: e.institution,
                year: e.year,
            }),
        );

        let prefs = &mut draft.preferences;
        fill_tags(&mut prefs.desired_job_titles, self.desired_job_titles);
        fill_tags(&mut prefs.preferred_locations, self.preferred_locations);
        prefs.work_mode = self.work_mode.into_iter().collect();
        prefs.job_type = self.job_type.into_iter().collect();
        prefs.salary_min = self.salary_min;
        prefs.salary_max = self.salary_max;
        prefs.salary_currency = self.salary_currency;
        prefs.company_size = self.company_size.into_iter().collect();
        prefs.preferred_industries = self.preferred_industries.into_iter().collect();

        draft.resume.resume = attach(base, self.resume.as_deref()).await?;

        Ok(draft)
    }
}

fn fill_tags(editor: &mut TagEditor, values: Vec<String>) {
    for value in values {
        editor.set_input(value);
        if editor.commit().is_none() {
            warn!(value = %editor.input, "Skipping empty or duplicate entry");
            editor.input.clear();
        }
    }
}

fn fill_records<S: StagedRecord + std::fmt::Debug>(
    editor: &mut RecordEditor<S>,
    inputs: impl IntoIterator<Item = S>,
) {
    for input in inputs {
        editor.staging = input;
        if editor.commit().is_none() {
            warn!(record = ?editor.staging, "Skipping incomplete entry");
            editor.staging = S::default();
        }
    }
}

async fn attach(base: &Path, path: Option<&Path>) -> anyhow::Result<Option<FileAttachment>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let full = base.join(path);
    let file = FileAttachment::from_path(&full)
        .await
        .with_context(|| format!("Failed to load attachment {}", full.display()))?;
    Ok(Some(file))
}
