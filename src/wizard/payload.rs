//! Registration submission serializer.
//!
//! The draft is flattened into an ordered list of named parts before it is
//! turned into a `multipart/form-data` body. Scalars become text parts, each
//! collection becomes exactly one JSON text part, and files are only present
//! when the user picked one.

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::wizard::draft::{FileAttachment, RegistrationDraft};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    /// A whole collection serialized as one JSON document.
    Json(String),
    File(FileAttachment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPart {
    pub name: &'static str,
    pub value: PartValue,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationPayload {
    parts: Vec<PayloadPart>,
}

impl RegistrationPayload {
    pub fn from_draft(draft: &RegistrationDraft) -> ApiResult<Self> {
        let basic = &draft.basic;
        let professional = &draft.professional;
        let skills = &draft.skills;
        let prefs = &draft.preferences;

        let mut payload = Self::default();

        payload.text("name", basic.full_name());
        payload.text("email", &basic.email);
        payload.text("password", &basic.password);
        payload.text("phone", &basic.phone);
        payload.text("location", &basic.location);
        payload.text("linkedin", &basic.linkedin);
        payload.text("portfolio", &basic.portfolio);

        payload.text("jobTitle", &professional.job_title);
        payload.text(
            "yearsOfExperience",
            professional.years_of_experience.map(|y| y.as_str()).unwrap_or_default(),
        );
        payload.text(
            "experienceLevel",
            professional.experience_level.map(|l| l.as_str()).unwrap_or_default(),
        );
        payload.text("currentCompany", &professional.current_company);
        payload.text("industry", &professional.industry);
        payload.text("professionalSummary", &professional.professional_summary);

        payload.json("primarySkills", &skills.primary_skills.tags)?;
        payload.json("secondarySkills", &skills.secondary_skills.tags)?;
        payload.json("technicalSkills", &skills.technical_skills.tags)?;
        payload.json("softSkills", &skills.soft_skills.tags)?;
        payload.json("certifications", &skills.certifications.records)?;
        payload.json("languages", &skills.languages.records)?;
        payload.json("education", &skills.education.records)?;

        payload.json("desiredJobTitles", &prefs.desired_job_titles.tags)?;
        payload.json("preferredLocations", &prefs.preferred_locations.tags)?;
        payload.json("workMode", &prefs.work_mode)?;
        payload.json("jobType", &prefs.job_type)?;
        payload.text("salaryMin", optional_number(prefs.salary_min));
        payload.text("salaryMax", optional_number(prefs.salary_max));
        payload.text("salaryCurrency", prefs.salary_currency.as_str());
        payload.json("companySize", &prefs.company_size)?;
        payload.json("preferredIndustries", &prefs.preferred_industries)?;

        if let Some(picture) = &basic.profile_picture {
            payload.file("profilePicture", picture.clone());
        }
        if let Some(resume) = &draft.resume.resume {
            payload.file("resume", resume.clone());
        }

        Ok(payload)
    }

    fn text(&mut self, name: &'static str, value: impl Into<String>) {
        self.parts.push(PayloadPart {
            name,
            value: PartValue::Text(value.into()),
        });
    }

    fn json<T: Serialize + ?Sized>(&mut self, name: &'static str, value: &T) -> ApiResult<()> {
        let encoded = serde_json::to_string(value)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to encode {name}: {e}")))?;
        self.parts.push(PayloadPart {
            name,
            value: PartValue::Json(encoded),
        });
        Ok(())
    }

    fn file(&mut self, name: &'static str, file: FileAttachment) {
        self.parts.push(PayloadPart {
            name,
            value: PartValue::File(file),
        });
    }

    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.parts.iter().map(|p| p.name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&PartValue> {
        self.parts.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    pub fn has_file(&self, name: &str) -> bool {
        matches!(self.get(name), Some(PartValue::File(_)))
    }

    /// Builds the multipart body, consuming the payload.
    pub fn into_form(self) -> ApiResult<Form> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part.value {
                PartValue::Text(text) | PartValue::Json(text) => form.text(part.name, text),
                PartValue::File(file) => form.part(part.name, file_part(file)?),
            };
        }
        Ok(form)
    }
}

/// A multipart file part carrying the attachment's name and content type.
pub fn file_part(file: FileAttachment) -> ApiResult<Part> {
    Part::bytes(file.bytes)
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)
        .map_err(|e| ApiError::Attachment(format!("{}: {e}", file.file_name)))
}

fn optional_number(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Proficiency, WorkMode, YearsOfExperience};

    fn filled_draft() -> RegistrationDraft {
        let mut draft = RegistrationDraft::new();
        draft.basic.first_name = "Grace".to_string();
        draft.basic.last_name = "Hopper".to_string();
        draft.basic.email = "grace@example.com".to_string();
        draft.basic.password = "compiler1".to_string();
        draft.professional.years_of_experience = Some(YearsOfExperience::TenPlus);

        let skills = &mut draft.skills;
        skills.primary_skills.tags.add("COBOL");
        skills.primary_skills.tags.add("Python");
        skills.languages.staging.language = "English".to_string();
        skills.languages.staging.proficiency = Some(Proficiency::Native);
        skills.languages.commit();

        draft.preferences.desired_job_titles.tags.add("Rear Admiral");
        draft.preferences.work_mode.toggle(WorkMode::OnSite);
        draft.preferences.salary_min = Some(120_000);
        draft
    }

    fn text<'a>(payload: &'a RegistrationPayload, name: &str) -> &'a str {
        match payload.get(name) {
            Some(PartValue::Text(t)) | Some(PartValue::Json(t)) => t,
            other => panic!("{name} is not a text part: {other:?}"),
        }
    }

    #[test]
    fn test_scalar_parts() {
        let payload = RegistrationPayload::from_draft(&filled_draft()).unwrap();
        assert_eq!(text(&payload, "name"), "Grace Hopper");
        assert_eq!(text(&payload, "yearsOfExperience"), "10+");
        assert_eq!(text(&payload, "experienceLevel"), "");
        assert_eq!(text(&payload, "salaryMin"), "120000");
        assert_eq!(text(&payload, "salaryMax"), "");
        assert_eq!(text(&payload, "salaryCurrency"), "USD");
    }

    #[test]
    fn test_collections_are_single_json_parts() {
        let payload = RegistrationPayload::from_draft(&filled_draft()).unwrap();
        assert_eq!(
            payload.get("primarySkills"),
            Some(&PartValue::Json(r#"["COBOL","Python"]"#.to_string()))
        );
        assert_eq!(
            payload.get("languages"),
            Some(&PartValue::Json(
                r#"[{"language":"English","proficiency":"Native"}]"#.to_string()
            ))
        );
        assert_eq!(text(&payload, "workMode"), r#"["On-site"]"#);
        assert_eq!(text(&payload, "companySize"), "[]");

        let names = payload.names();
        for name in ["primarySkills", "certifications", "education", "preferredIndustries"] {
            assert_eq!(names.iter().filter(|n| **n == name).count(), 1, "{name}");
        }
    }

    #[test]
    fn test_absent_files_are_omitted() {
        let payload = RegistrationPayload::from_draft(&filled_draft()).unwrap();
        assert!(!payload.has_file("profilePicture"));
        assert!(!payload.has_file("resume"));
        assert_eq!(payload.names().last(), Some(&"preferredIndustries"));
    }

    #[test]
    fn test_present_files_are_appended_last() {
        let mut draft = filled_draft();
        draft.basic.profile_picture = Some(FileAttachment::new("me.png", "image/png", vec![0u8; 4]));
        draft.resume.resume = Some(FileAttachment::new("cv.pdf", "application/pdf", vec![1u8; 4]));

        let payload = RegistrationPayload::from_draft(&draft).unwrap();
        let names = payload.names();
        assert_eq!(&names[names.len() - 2..], &["profilePicture", "resume"]);
        assert!(payload.into_form().is_ok());
    }

    #[test]
    fn test_terms_and_confirm_password_not_sent() {
        let payload = RegistrationPayload::from_draft(&filled_draft()).unwrap();
        let names = payload.names();
        assert!(!names.contains(&"confirmPassword"));
        assert!(!names.contains(&"agreedToTerms"));
    }

    #[test]
    fn test_invalid_content_type_rejected() {
        let file = FileAttachment::new("bad.bin", "not a mime", vec![1]);
        let err = file_part(file).unwrap_err();
        assert_eq!(err.error_code(), "ATTACHMENT_ERROR");
    }
}
