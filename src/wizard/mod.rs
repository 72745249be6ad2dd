//! Five-step registration wizard.
//!
//! The wizard owns a [`RegistrationDraft`] and the current [`Step`]. Moving
//! forward runs the validation gate for the step being left; moving back is
//! always allowed. Submission happens from the last step only and issues a
//! single request through the injected [`SessionStore`].

pub mod draft;
pub mod import;
pub mod payload;
pub mod step;
pub mod tags;
pub mod validation;

pub use draft::{FileAttachment, RegistrationDraft};
pub use import::DraftFile;
pub use payload::RegistrationPayload;
pub use step::Step;
pub use tags::{RecordEditor, SelectionSet, TagEditor, TagSet};
pub use validation::{validate_step, ValidationError};

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::domain::UserRecord;
use crate::error::ApiError;
use crate::session::SessionStore;

pub const SUBMISSION_FALLBACK: &str = "Failed to create account.";

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("A submission is already in progress")]
    Busy,

    #[error("Registration can only be submitted from the last step")]
    NotOnFinalStep,

    #[error("Registration is already complete")]
    Completed,

    /// Carries the text shown to the user.
    #[error("{0}")]
    Submission(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Submitting,
    Completed,
}

#[derive(Debug)]
pub struct RegistrationWizard {
    draft: RegistrationDraft,
    step: Step,
    phase: Phase,
    error: Option<String>,
    scroll_to_top: bool,
}

impl Default for RegistrationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationWizard {
    pub fn new() -> Self {
        Self::with_draft(RegistrationDraft::default())
    }

    pub fn with_draft(draft: RegistrationDraft) -> Self {
        Self {
            draft,
            step: Step::FIRST,
            phase: Phase::Editing,
            error: None,
            scroll_to_top: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Message currently displayed above the form.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Mutable access for field input. Nothing is checked until `next`.
    pub fn draft_mut(&mut self) -> &mut RegistrationDraft {
        &mut self.draft
    }

    /// Returns and clears the pending scroll-to-top request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }

    fn ensure_editing(&self) -> Result<(), WizardError> {
        match self.phase {
            Phase::Editing => Ok(()),
            Phase::Submitting => Err(WizardError::Busy),
            Phase::Completed => Err(WizardError::Completed),
        }
    }

    /// Advances one step if the current step validates.
    pub fn next(&mut self) -> Result<Step, WizardError> {
        self.ensure_editing()?;

        if let Err(e) = validate_step(self.step, &self.draft) {
            debug!(step = self.step.number(), error = %e, "Step validation failed");
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        self.step = self.step.next();
        self.error = None;
        self.scroll_to_top = true;
        Ok(self.step)
    }

    /// Goes back one step without validating.
    pub fn previous(&mut self) -> Result<Step, WizardError> {
        self.ensure_editing()?;
        self.step = self.step.previous();
        self.error = None;
        Ok(self.step)
    }

    /// Enters the submitting phase and serializes the draft.
    ///
    /// While submitting, navigation and a second submission are rejected
    /// with [`WizardError::Busy`].
    pub fn begin_submission(&mut self) -> Result<RegistrationPayload, WizardError> {
        self.ensure_editing()?;
        if !self.step.is_last() {
            return Err(WizardError::NotOnFinalStep);
        }

        let payload = match RegistrationPayload::from_draft(&self.draft) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to serialize registration");
                let message = e.user_message(SUBMISSION_FALLBACK);
                self.error = Some(message.clone());
                return Err(WizardError::Submission(message));
            }
        };

        self.error = None;
        self.phase = Phase::Submitting;
        Ok(payload)
    }

    /// Applies the outcome of the registration request.
    ///
    /// Success discards the draft. Failure keeps the draft and the step and
    /// shows the server message, or the generic fallback.
    pub fn complete_submission(
        &mut self,
        outcome: Result<UserRecord, ApiError>,
    ) -> Result<UserRecord, WizardError> {
        match outcome {
            Ok(user) => {
                self.phase = Phase::Completed;
                self.error = None;
                drop(std::mem::take(&mut self.draft));
                info!(user_id = %user.id, "Registration complete");
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Registration failed");
                self.phase = Phase::Editing;
                let message = e.user_message(SUBMISSION_FALLBACK);
                self.error = Some(message.clone());
                Err(WizardError::Submission(message))
            }
        }
    }

    /// Serializes the draft and registers through `session`.
    #[instrument(skip_all)]
    pub async fn submit(&mut self, session: &SessionStore) -> Result<UserRecord, WizardError> {
        let payload = self.begin_submission()?;
        let outcome = match payload.into_form() {
            Ok(form) => session.register(form).await,
            Err(e) => Err(e),
        };
        self.complete_submission(outcome)
    }
}
