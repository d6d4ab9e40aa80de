//! Session layer error types.
//!
//! Only [`StorageError`] is public: storage backends return it. The other
//! errors never leave the store, which recovers from them by falling back to
//! the anonymous state.

use journal_portal_core::TokenError;
use thiserror::Error;

/// Errors returned by a [`SessionStorage`](crate::SessionStorage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be represented by this backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Reasons a persisted session is discarded during hydration.
#[derive(Debug, Error)]
pub(crate) enum HydrateError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("malformed user record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid stored token: {0}")]
    Token(#[from] TokenError),

    #[error("incomplete session: {0}")]
    Incomplete(&'static str),
}

/// Failures while writing a session through to storage.
#[derive(Debug, Error)]
pub(crate) enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to encode user record: {0}")]
    Encode(#[from] serde_json::Error),
}
