//! ResuMatch client core.
//!
//! Registration wizard, session store, settings panel and job board, all
//! talking to the ResuMatch backend through one [`services::ApiClient`].

pub mod config;
pub mod domain;
pub mod error;
pub mod jobs;
pub mod logging;
pub mod services;
pub mod session;
pub mod settings;
pub mod wizard;

pub use error::{ApiError, ApiResult};
pub use jobs::JobBoard;
pub use session::{SessionState, SessionStore};
pub use settings::SettingsPanel;
pub use wizard::{RegistrationWizard, WizardError};
