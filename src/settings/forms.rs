//! Settings tab forms.
//!
//! Each form is seeded from the server-confirmed [`UserRecord`] and knows the
//! JSON body its tab sends.

use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;
use tracing::warn;

use crate::domain::{CompanySize, Industry, JobType, UserRecord, WorkMode};
use crate::wizard::tags::{
    CertificationInput, EducationInput, LanguageInput, RecordEditor, RecordList, SelectionSet,
    StagedRecord, TagEditor, TagSet,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(rename = "linkedIn")]
    pub linkedin: String,
    pub portfolio: String,
    pub profile_picture: Option<String>,
}

impl PersonalInfoForm {
    pub fn from_user(user: &UserRecord) -> Self {
        let (first_name, last_name) = user.split_name();
        Self {
            first_name,
            last_name,
            email: user.email.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            location: user.location.clone().unwrap_or_default(),
            linkedin: user.linkedin_profile.clone().unwrap_or_default(),
            portfolio: user.portfolio_website.clone().unwrap_or_default(),
            profile_picture: user.profile_picture_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalInfoForm {
    pub current_title: String,
    pub years_of_experience: String,
    pub experience_level: String,
    pub current_company: String,
    pub industry: String,
    pub professional_summary: String,
}

impl ProfessionalInfoForm {
    pub fn from_user(user: &UserRecord) -> Self {
        Self {
            current_title: user.job_title.clone().unwrap_or_default(),
            years_of_experience: user.years_of_experience.clone().unwrap_or_default(),
            experience_level: user.experience_level.clone().unwrap_or_default(),
            current_company: user.current_company.clone().unwrap_or_default(),
            industry: user.industry.clone().unwrap_or_default(),
            professional_summary: user.professional_summary.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SkillsForm {
    pub primary_skills: TagEditor,
    pub secondary_skills: TagEditor,
    pub technical_skills: TagEditor,
    pub soft_skills: TagEditor,
    pub certifications: RecordEditor<CertificationInput>,
    pub languages: RecordEditor<LanguageInput>,
    pub education: RecordEditor<EducationInput>,
}

impl SkillsForm {
    pub fn from_user(user: &UserRecord) -> Self {
        let skills = user.skills.clone().unwrap_or_default();
        Self {
            primary_skills: editor(skills.primary),
            secondary_skills: editor(skills.secondary),
            technical_skills: editor(skills.technical),
            soft_skills: editor(skills.soft),
            certifications: records::<CertificationInput>(skills.certifications),
            languages: records::<LanguageInput>(skills.languages),
            education: records::<EducationInput>(user.education.clone().unwrap_or_default()),
        }
    }

    pub fn body(&self) -> Value {
        json!({
            "primarySkills": self.primary_skills.tags,
            "secondarySkills": self.secondary_skills.tags,
            "technicalSkills": self.technical_skills.tags,
            "softSkills": self.soft_skills.tags,
            "certifications": self.certifications.records,
            "languages": self.languages.records,
            "education": self.education.records,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreferencesForm {
    pub desired_titles: TagEditor,
    pub preferred_locations: TagEditor,
    pub work_mode: SelectionSet<WorkMode>,
    pub job_type: SelectionSet<JobType>,
    pub salary_min: String,
    pub salary_max: String,
    pub company_sizes: SelectionSet<CompanySize>,
    pub preferred_industries: SelectionSet<Industry>,
}

impl PreferencesForm {
    pub fn from_user(user: &UserRecord) -> Self {
        let prefs = user.job_preferences.clone().unwrap_or_default();
        let salary = prefs.salary.unwrap_or_default();
        Self {
            desired_titles: editor(prefs.job_titles),
            preferred_locations: editor(prefs.locations),
            work_mode: options(&prefs.work_mode),
            job_type: options(&prefs.job_type),
            salary_min: salary.min.unwrap_or_default(),
            salary_max: salary.max.unwrap_or_default(),
            company_sizes: options(&prefs.company_size),
            preferred_industries: options(&prefs.industries),
        }
    }

    pub fn body(&self) -> Value {
        json!({
            "desiredTitles": self.desired_titles.tags,
            "preferredLocations": self.preferred_locations.tags,
            "workMode": self.work_mode,
            "jobType": self.job_type,
            "salaryMin": self.salary_min,
            "salaryMax": self.salary_max,
            "companySizes": self.company_sizes,
            "preferredIndustries": self.preferred_industries,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn passwords_match(&self) -> bool {
        self.new_password == self.confirm_password
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn editor(values: Vec<String>) -> TagEditor {
    TagEditor {
        input: String::new(),
        tags: values.into_iter().collect::<TagSet>(),
    }
}

/// Existing records seeded back into an editor under fresh ids.
fn records<S: StagedRecord>(existing: Vec<S::Output>) -> RecordEditor<S> {
    RecordEditor {
        staging: S::default(),
        records: existing.into_iter().collect::<RecordList<_>>(),
    }
}

/// Parses stored option strings, skipping values the client does not know.
fn options<T>(values: &[String]) -> SelectionSet<T>
where
    T: FromStr + Copy + PartialEq,
    T::Err: std::fmt::Display,
{
    values
        .iter()
        .filter_map(|v| match v.parse::<T>() {
            Ok(option) => Some(option),
            Err(e) => {
                warn!(error = %e, "Ignoring stored preference");
                None
            }
        })
        .collect()
}
