//! ResuMatch command-line client.
//!
//! Reads configuration from the environment (see `config::Settings`) and keeps
//! the bearer token in `RESUMATCH_TOKEN_FILE` between invocations.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use resumatch::config::Settings;
use resumatch::domain::ApplicationStatus;
use resumatch::logging::init_logging;
use resumatch::services::{ApiClient, FileTokenStore};
use resumatch::wizard::{DraftFile, RegistrationWizard, WizardError};
use resumatch::{JobBoard, SessionStore};

#[derive(Parser)]
#[command(name = "resumatch", about = "ResuMatch API client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account from a JSON draft file
    Register {
        /// Path to the draft file
        #[arg(long)]
        draft: PathBuf,
    },
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RESUMATCH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the signed-in user
    Me,
    /// Forget the stored session token
    Logout,
    /// Request a password reset email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// List saved jobs
    SavedJobs,
    /// List applications
    Applications {
        /// Applied, Interviewing, Accepted or Rejected
        #[arg(long, value_parser = parse_status)]
        status: Option<ApplicationStatus>,
    },
}

fn parse_status(s: &str) -> Result<ApplicationStatus, String> {
    ApplicationStatus::ALL
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown status '{s}'"))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Restores the stored session, failing when nobody is signed in.
async fn require_session(session: &SessionStore) -> Result<()> {
    session.hydrate().await;
    if !session.is_authenticated() {
        bail!("Not signed in. Run `resumatch login` first.");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    init_logging(&settings.env);

    let cli = Cli::parse();

    let tokens = Arc::new(FileTokenStore::new(settings.token_file.clone()));
    let api = ApiClient::new(&settings.api_url, settings.http_timeout_seconds, tokens)
        .context("Failed to create API client")?;
    let session = SessionStore::new(api);

    match cli.command {
        Commands::Register { draft } => {
            let draft = DraftFile::load(&draft).await?;
            let mut wizard = RegistrationWizard::with_draft(draft);

            while !wizard.step().is_last() {
                let step = wizard.step();
                wizard
                    .next()
                    .map_err(|e| anyhow::anyhow!("Step {step}: {e}"))?;
            }

            match wizard.submit(&session).await {
                Ok(user) => print_json(&user)?,
                Err(WizardError::Submission(message)) => bail!(message),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Login { email, password } => {
            let user = session
                .login(&email, &password)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message("Failed to login")))?;
            print_json(&user)?;
        }
        Commands::Me => {
            require_session(&session).await?;
            if let Some(user) = session.current_user() {
                print_json(&user)?;
            }
        }
        Commands::Logout => {
            session.logout();
            println!("Signed out");
        }
        Commands::ForgotPassword { email } => {
            session
                .forgot_password(&email)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message("Failed to send reset email")))?;
            println!("Password reset instructions sent to {email}");
        }
        Commands::SavedJobs => {
            require_session(&session).await?;
            let board = JobBoard::new(session.clone());
            board.refresh().await;
            print_json(&board.saved_jobs())?;
        }
        Commands::Applications { status } => {
            require_session(&session).await?;
            let board = JobBoard::new(session.clone());
            let applications = board.applications_with_status(status).await?;
            print_json(&applications)?;
        }
    }

    Ok(())
}
