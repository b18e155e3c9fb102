//! Bearer token persistence.
//!
//! The token is stored as JSON in the state directory and written
//! atomically (temp file in the same directory, then rename), so a crash
//! never leaves a truncated token behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Token saved after a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    /// Bearer token sent with every protected request.
    pub token: String,
    /// User the token was issued to.
    pub username: String,
    /// When the token was saved.
    pub saved_at: DateTime<Utc>,
}

impl StoredToken {
    /// Creates a token record stamped with the current time.
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            saved_at: Utc::now(),
        }
    }
}

/// File-backed token store.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the configured token file.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.token_file())
    }

    /// Path of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored token, or `None` if no one is logged in.
    pub fn load(&self) -> Result<Option<StoredToken>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        let token = serde_json::from_str(&data)?;
        Ok(Some(token))
    }

    /// Saves the token, replacing any previous one.
    pub fn save(&self, token: &StoredToken) -> Result<()> {
        let json = serde_json::to_string_pretty(token)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|source| self.io_error(source))?;

        // NamedTempFile is created with owner-only permissions on unix
        let mut temp_file =
            tempfile::NamedTempFile::new_in(dir).map_err(|source| self.io_error(source))?;
        temp_file
            .write_all(json.as_bytes())
            .map_err(|source| self.io_error(source))?;
        temp_file.flush().map_err(|source| self.io_error(source))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        debug!(path = %self.path.display(), username = %token.username, "token saved");
        Ok(())
    }

    /// Removes the stored token. Returns true if one existed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> ClientError {
        ClientError::TokenStore {
            path: self.path.clone(),
            source,
        }
    }
}
