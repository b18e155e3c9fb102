//! Error types for API access.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while talking to the Web Manager API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API URL or endpoint path.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// No stored token for a protected request.
    #[error("not logged in (run `webmanager login` first)")]
    NotAuthenticated,

    /// The API rejected the credentials or token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Non-success response from the API.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the response body.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("failed to parse response: {0}")]
    ResponseParse(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Token file could not be read or written.
    #[error("token store error at {path}: {source}")]
    TokenStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
