//! Fetch capability consumed by the controller.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use webmanager_models::BlockId;

/// Description of a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchFailure {
    /// Message shown to the user.
    pub message: String,
}

impl FetchFailure {
    /// Creates a failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates a failure from any displayable error.
    pub fn from_error(error: impl fmt::Display) -> Self {
        Self::new(error.to_string())
    }
}

/// Loads the full content for a selected item.
///
/// Implementations report every failure through the returned `Result`;
/// the controller calls `fetch` exactly once per settled selection.
#[async_trait]
pub trait FetchService: Send + Sync + 'static {
    /// Loaded payload.
    type Content: Clone + fmt::Debug + Send + Sync + 'static;

    /// Fetches the content for `id`.
    async fn fetch(&self, id: BlockId) -> Result<Self::Content, FetchFailure>;
}
