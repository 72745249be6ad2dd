//! Persisted bearer token storage.
//!
//! The session keeps exactly one value under the well-known key [`TOKEN_KEY`].
//! Its presence alone decides whether hydration is attempted at startup.

use parking_lot::Mutex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key under which the bearer token is stored.
pub const TOKEN_KEY: &str = "token";

/// Storage for the session's bearer token.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> io::Result<()>;
    fn remove(&self) -> io::Result<()>;
}

/// In-process token storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn set(&self, token: &str) -> io::Result<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> io::Result<()> {
        *self.token.lock() = None;
        Ok(())
    }
}

/// Token storage in a small JSON document on disk (`{"token": "..."}`).
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> serde_json::Map<String, serde_json::Value> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Default::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read session file");
                return Default::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "Ignoring malformed session file");
                Default::default()
            }
        }
    }

    fn write_document(&self, doc: &serde_json::Map<String, serde_json::Value>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_vec_pretty(doc).map_err(io::Error::other)?;
        fs::write(&self.path, body)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let _guard = self.lock.lock();
        self.read_document()
            .get(TOKEN_KEY)
            .and_then(|v| v.as_str())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    fn set(&self, token: &str) -> io::Result<()> {
        let _guard = self.lock.lock();
        let mut doc = self.read_document();
        doc.insert(TOKEN_KEY.to_string(), serde_json::Value::String(token.to_string()));
        self.write_document(&doc)
    }

    fn remove(&self) -> io::Result<()> {
        let _guard = self.lock.lock();
        let mut doc = self.read_document();
        if doc.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        if doc.is_empty() {
            match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
                _ => return Ok(()),
            }
        }
        self.write_document(&doc)
    }
}
