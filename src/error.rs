//! Error types shared across the crate.

use thiserror::Error;

/// Failures talking to the vector-store service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server error: HTTP {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("No API key configured (set OPENAI_API_KEY or api_key in the config file)")]
    MissingApiKey,
}

/// Failures surfaced by attribute editing and CSV import.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Invalid CSV format: {0}")]
    InvalidFormat(String),

    #[error("Invalid JSON in attributes for file \"{file_name}\": {source}")]
    InvalidJson {
        file_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid metadata for file \"{file_name}\": {reason}")]
    SchemaViolation { file_name: String, reason: String },

    #[error("No valid rows found in CSV")]
    NoValidRows,

    #[error("File not found: {file_id}")]
    NotFound { file_id: String },

    #[error("Attribute limits exceeded: {0}")]
    AttributeLimit(String),

    #[error(transparent)]
    RemoteFailure(#[from] ApiError),
}

impl AdminError {
    /// Parse-stage errors abort an import before any remote call is made.
    pub fn aborts_import(&self) -> bool {
        matches!(
            self,
            AdminError::InvalidFormat(_)
                | AdminError::InvalidJson { .. }
                | AdminError::SchemaViolation { .. }
                | AdminError::NoValidRows
        )
    }
}

pub type AdminResult<T> = Result<T, AdminError>;
