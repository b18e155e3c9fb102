//! Error types for the selection crate.

use thiserror::Error;

use webmanager_models::BlockId;

/// Errors that can occur while navigating or shutting down.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Index outside the selection list.
    #[error("index {index} out of range (list has {len} items)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the list.
        len: usize,
    },

    /// ID not present in the selection list.
    #[error("unknown block id: {0}")]
    UnknownId(BlockId),

    /// Shutdown error.
    #[error("shutdown error: {0}")]
    Shutdown(String),
}

/// Result type for selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;
