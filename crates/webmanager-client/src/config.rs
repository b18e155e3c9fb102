//! Client configuration.
//!
//! # Environment Variables
//!
//! - `WEBMANAGER_API_URL`: Base URL of the Web Manager API
//! - `WEBMANAGER_STATE_DIR`: Override the state directory (token storage)
//! - `WEBMANAGER_TIMEOUT_SECS`: Request timeout in seconds

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{ClientError, Result};

/// Environment variable for the API base URL.
pub const API_URL_ENV: &str = "WEBMANAGER_API_URL";

/// Environment variable for a custom state directory.
pub const STATE_DIR_ENV: &str = "WEBMANAGER_STATE_DIR";

/// Environment variable for the request timeout.
pub const TIMEOUT_ENV: &str = "WEBMANAGER_TIMEOUT_SECS";

/// API URL used when none is configured (local development server).
const DEFAULT_API_URL: &str = "http://localhost:8000/api/";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".webmanager";

const TOKEN_FILE: &str = "token.json";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL; endpoint paths are joined onto it.
    pub api_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Directory holding the token file.
    pub state_dir: PathBuf,
}

impl ClientConfig {
    /// Creates a config for the given API URL with default settings.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url: normalize(api_url),
            timeout: DEFAULT_TIMEOUT,
            state_dir: default_state_dir(),
        }
    }

    /// Creates a config from environment variables.
    ///
    /// Unset variables fall back to defaults; malformed values are errors.
    pub fn from_env() -> Result<Self> {
        let api_url = match std::env::var(API_URL_ENV) {
            Ok(value) => Url::parse(&value).map_err(|e| {
                ClientError::Configuration(format!("{} is not a valid URL: {}", API_URL_ENV, e))
            })?,
            Err(_) => Url::parse(DEFAULT_API_URL)?,
        };

        let mut config = Self::new(api_url);

        if let Ok(value) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = value.parse().map_err(|_| {
                ClientError::Configuration(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    TIMEOUT_ENV, value
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(dir) = std::env::var(STATE_DIR_ENV) {
            config.state_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Sets the API URL.
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = normalize(api_url);
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the state directory.
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    /// Path of the stored bearer token.
    pub fn token_file(&self) -> PathBuf {
        self.state_dir.join(TOKEN_FILE)
    }
}

/// Get the default state directory (`~/.webmanager`).
fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_STATE_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
}

/// Ensure the path ends with `/` so relative endpoints join below it.
fn normalize(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
