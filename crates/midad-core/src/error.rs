//! Blog error taxonomy
//!
//! Contract violations (`DuplicateId`, `NotFound`) are returned
//! synchronously and are expected to be caught at the call site and shown
//! to the user. Per-record parse errors are isolated: a listing scan skips
//! the bad record, while a point lookup surfaces `Parse`.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors produced by the content store and catalog
#[derive(Error, Debug)]
pub enum BlogError {
    /// Create was called with an id that already exists in the merged view
    #[error("a post with id '{id}' already exists")]
    DuplicateId { id: String },

    /// Update or delete was called with an id absent from the merged view
    #[error("post not found: '{id}'")]
    NotFound { id: String },

    /// A draft write lost a compare-and-swap race with another writer
    #[error(
        "draft '{key}' was changed by another writer (expected version {expected}, found {found})"
    )]
    DraftConflict {
        key: String,
        expected: u64,
        found: u64,
    },

    /// A stored record could not be deserialized
    #[error("malformed record under key '{key}': {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The underlying key-value storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for blog operations
pub type BlogResult<T> = Result<T, BlogError>;
