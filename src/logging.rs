//! Tracing setup for the CLI.
//!
//! Everything is written to stderr; stdout carries command output only.

use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Directives used when `RUST_LOG` is unset.
pub fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "resumatch=debug,reqwest=info,warn",
        Environment::Staging => "resumatch=debug,warn",
        Environment::Prod => "resumatch=info,warn",
    }
}

pub fn init_logging(env: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    match env {
        Environment::Prod => builder.json().init(),
        _ => builder.compact().init(),
    }

    tracing::debug!(env = ?env, "Logging ready");
}
