use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TOKEN_FILE: &str = ".resumatch/session.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,

    // Backend API
    pub api_url: Url,
    pub http_timeout_seconds: u64,

    // Persisted session
    pub token_file: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));

        let api_url = env::var("RESUMATCH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url)
            .with_context(|| format!("RESUMATCH_API_URL is not a valid URL: {api_url}"))?;

        let http_timeout_seconds = env::var("RESUMATCH_HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let token_file = env::var("RESUMATCH_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_FILE));

        Ok(Settings {
            env,
            api_url,
            http_timeout_seconds,
            token_file,
        })
    }
}
