//! Service layer modules for external integrations.
//!
//! Contains the backend API client and the persisted token storage it reads.

pub mod api_client;
pub mod token_store;

pub use api_client::{should_redirect_to_login, ApiClient};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
