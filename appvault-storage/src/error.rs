//! Error types for the storage layer.

use appvault_types::{RecordKind, ValidationError};
use thiserror::Error;

/// All errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage quota exceeded: need {needed} bytes, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("{kind:?} record not found: {id}")]
    NotFound { kind: RecordKind, id: String },

    #[error("{kind:?} record already exists: {id}")]
    DuplicateId { kind: RecordKind, id: String },

    #[error("update changed the identity of {kind:?} record {id}")]
    IdentityChanged { kind: RecordKind, id: String },

    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
}

pub type StorageResult<T> = Result<T, StorageError>;
