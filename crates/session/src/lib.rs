//! Journal Portal session layer.
//!
//! Single source of truth for "who is logged in right now" and "which
//! credential to attach to outgoing API calls", durable across restarts.
//!
//! # Architecture
//!
//! - [`SessionStore`] owns the in-memory session and mirrors every mutation
//!   to a [`SessionStorage`] backend (write-through). Persisted state is read
//!   once, by [`SessionStore::hydrate`].
//! - [`storage`] provides the backends: [`MemoryStorage`] for tests and
//!   ephemeral use, [`FileStorage`] for durable on-disk persistence.
//! - [`TrustedAssertion`] marks identity data that the caller vouches for
//!   after an external credential exchange. Nothing here verifies it.
//!
//! # Example
//!
//! ```
//! use journal_portal_core::{AccessToken, Email};
//! use journal_portal_session::{MemoryStorage, SessionStore, TrustedAssertion};
//!
//! let mut store = SessionStore::new(MemoryStorage::new());
//! store.hydrate();
//! assert!(store.is_ready());
//! assert!(!store.is_authenticated());
//!
//! let email = Email::parse("jane.doe@example.com").unwrap();
//! let token = AccessToken::new("tok123").unwrap();
//! store.login_with_jwt(TrustedAssertion::new(email), token, None);
//!
//! assert!(store.is_authenticated());
//! assert_eq!(store.user().unwrap().display_name, "jane.doe");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod assertion;
mod error;
pub mod models;
mod status;
pub mod storage;
mod store;

pub use assertion::{JWT_USER_ID, TrustedAssertion};
pub use error::StorageError;
pub use models::{Session, SessionUser, keys};
pub use status::{SessionStatus, StoredKeys};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::{DEMO_ADMIN_EMAIL, SessionState, SessionStore};
