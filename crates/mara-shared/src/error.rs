//! Error types for mara.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaraError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MaraError {
    /// Stable numeric code for each error class.
    pub fn code(&self) -> i32 {
        match self {
            MaraError::InvalidInput { .. } => -32001,
            MaraError::Storage(_) => -32002,
            MaraError::Search(_) => -32003,
            MaraError::Json(_) => -32700,
            MaraError::Internal(_) => -32603,
        }
    }

    /// True when the error is the caller's fault (rejected input) rather
    /// than a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, MaraError::InvalidInput { .. })
    }
}
