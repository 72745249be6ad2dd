//! Per-step validation gate.
//!
//! Checks run in a fixed order and stop at the first failure, so the user
//! sees one message at a time.

use thiserror::Error;

use crate::wizard::draft::{BasicInfo, JobPreferences, ProfessionalInfo, RegistrationDraft};
use crate::wizard::step::Step;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingBasicFields,

    #[error("Please enter password")]
    MissingPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,

    #[error("Please agree to the Terms of Services")]
    TermsNotAccepted,

    #[error("Please fill in required fields")]
    MissingProfessionalFields,

    #[error("Please select at least one desired job title and work mode")]
    MissingPreferences,
}

/// Checks whether the user may leave `step`.
pub fn validate_step(step: Step, draft: &RegistrationDraft) -> Result<(), ValidationError> {
    match step {
        Step::Basic => validate_basic(&draft.basic),
        Step::Professional => validate_professional(&draft.professional),
        Step::Skills => Ok(()),
        Step::Preferences => validate_preferences(&draft.preferences),
        Step::Resume => Ok(()),
    }
}

pub fn validate_basic(basic: &BasicInfo) -> Result<(), ValidationError> {
    let required = [
        &basic.first_name,
        &basic.last_name,
        &basic.email,
        &basic.phone,
        &basic.location,
    ];
    if required.iter().any(|field| field.is_empty()) {
        return Err(ValidationError::MissingBasicFields);
    }
    if basic.password.is_empty() || basic.confirm_password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    if basic.password != basic.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if basic.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if !basic.agreed_to_terms {
        return Err(ValidationError::TermsNotAccepted);
    }
    Ok(())
}

pub fn validate_professional(professional: &ProfessionalInfo) -> Result<(), ValidationError> {
    if professional.job_title.is_empty()
        || professional.years_of_experience.is_none()
        || professional.experience_level.is_none()
    {
        return Err(ValidationError::MissingProfessionalFields);
    }
    Ok(())
}

pub fn validate_preferences(preferences: &JobPreferences) -> Result<(), ValidationError> {
    if preferences.desired_job_titles.tags.is_empty() || preferences.work_mode.is_empty() {
        return Err(ValidationError::MissingPreferences);
    }
    Ok(())
}
