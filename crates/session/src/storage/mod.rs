//! Durable storage backends for session data.
//!
//! A backend is a flat string key/value store, the same shape as browser
//! local storage. The session layer touches exactly the keys listed in
//! [`keys`](crate::keys) and nothing else.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::StorageError;

/// Key/value storage used by the [`SessionStore`](crate::SessionStore).
///
/// Implementations should be synchronous from the caller's point of view:
/// when `set` or `remove` returns `Ok`, a subsequent `get` (including one
/// from a new process for durable backends) must observe the change.
pub trait SessionStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Whether a value is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be read.
    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: SessionStorage + ?Sized> SessionStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
