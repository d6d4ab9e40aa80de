//! Session-related types.
//!
//! Types held by the [`SessionStore`](crate::SessionStore) for
//! authentication state.

use serde::{Deserialize, Serialize};

use journal_portal_core::{AccessToken, Email, RefreshToken, Role, UserId};

/// Persisted user identity.
///
/// Serialized as the `auth:user` record. The display name is stored under
/// `username` to stay readable by existing portal clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Backend-assigned or locally synthesized identifier.
    pub id: UserId,
    /// Lower-cased email address.
    pub email: Email,
    /// Best-effort human name.
    #[serde(rename = "username")]
    pub display_name: String,
    /// Portal role.
    #[serde(default)]
    pub role: Role,
}

/// A fully established session.
///
/// Only the store constructs sessions, so a `Session` always carries both an
/// identity and an access token.
#[derive(Debug)]
pub struct Session {
    pub(crate) user: SessionUser,
    pub(crate) access_token: AccessToken,
    pub(crate) refresh_token: Option<RefreshToken>,
}

impl Session {
    /// The logged-in user.
    #[must_use]
    pub const fn user(&self) -> &SessionUser {
        &self.user
    }

    /// Bearer credential for authenticated API calls.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Refresh credential, if one was issued.
    #[must_use]
    pub const fn refresh_token(&self) -> Option<&RefreshToken> {
        self.refresh_token.as_ref()
    }
}

/// Storage keys for authentication data.
pub mod keys {
    /// Key for the serialized [`SessionUser`](super::SessionUser) record.
    pub const USER: &str = "auth:user";

    /// Key for the raw access token.
    pub const ACCESS_TOKEN: &str = "auth:access";

    /// Key for the raw refresh token.
    pub const REFRESH_TOKEN: &str = "auth:refresh";

    /// Every key owned by the session layer.
    pub const ALL: [&str; 3] = [USER, ACCESS_TOKEN, REFRESH_TOKEN];
}
