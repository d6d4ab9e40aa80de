//! In-memory storage backend.

use std::collections::HashMap;

use super::SessionStorage;
use crate::StorageError;

/// Non-durable storage backed by a `HashMap`.
///
/// Useful for tests and for processes that must not leave credentials on
/// disk. A restart can be simulated by moving the storage out of one store
/// with [`SessionStore::into_storage`](crate::SessionStore::into_storage) and
/// into a new one.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("auth:user").unwrap(), None);

        storage.set("auth:user", "{}").unwrap();
        assert_eq!(storage.get("auth:user").unwrap().as_deref(), Some("{}"));
        assert!(storage.contains("auth:user").unwrap());

        storage.remove("auth:user").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let mut storage = MemoryStorage::new();
        assert!(storage.remove("auth:refresh").is_ok());
    }
}
