// File: src/error.rs
// Purpose: Error taxonomy for storage, parsing, authentication and export
//
// Per-field validation failures are not errors here: they are collected in
// `form::ValidationReport` and shown inline on the form.

use thiserror::Error;

/// Failure reported by a key-value backend (quota exceeded, access denied)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storage backend error: {0}")]
pub struct StoreError(pub String);

/// Saving a submission failed; the submission is discarded
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("persistent storage is not available in this environment")]
    Unavailable,

    #[error("failed to store registration under {key}: {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("failed to serialize registration: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Backend(#[from] StoreError),
}

/// One stored record could not be read back; it is skipped
#[derive(Debug, Error)]
#[error("failed to parse stored registration {key}: {source}")]
pub struct ParseError {
    pub key: String,
    #[source]
    pub source: serde_json::Error,
}

/// Admin credentials did not match
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid username or password")]
pub struct AuthenticationError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("admin authentication required")]
    NotAuthenticated,

    #[error("No responses found to export")]
    Empty,

    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    #[error("failed to encode export: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to save export file: {0}")]
    Download(String),
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("no submission is pending")]
    NotPending,

    #[error(transparent)]
    Storage(#[from] StorageError),
}
