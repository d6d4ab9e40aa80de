//! Integration tests for the Journal Portal session layer.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p journal-portal-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_persistence` - Restart round-trips over the file backend
//! - `credential_exchange` - Backend login and registration against a mock server

use std::path::PathBuf;

use journal_portal_session::{FileStorage, SessionStore};
use tempfile::TempDir;

/// A session directory that lives as long as the test.
pub struct SessionDir {
    dir: TempDir,
}

impl SessionDir {
    /// Create a fresh, empty session directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp session dir"),
        }
    }

    /// Path of the session directory.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("session")
    }

    /// Open and hydrate a store over this directory, as a new process would.
    #[must_use]
    pub fn open(&self) -> SessionStore<FileStorage> {
        SessionStore::open(FileStorage::new(self.path()))
    }
}

impl Default for SessionDir {
    fn default() -> Self {
        Self::new()
    }
}
