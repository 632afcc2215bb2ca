//! Error types for the debt store and reconciliation.

use thiserror::Error;
use wealth_model::ValidationError;

/// Debt store error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Create collided with an existing record
    #[error("Create conflicted with an existing record")]
    Conflict {
        /// Id of the existing record, when the server reported one
        existing_id: Option<String>,
    },

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Record failed local validation; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
