//! Caller-vouched identity for the JWT login path.

use journal_portal_core::{Email, Role, UserId};

use crate::SessionUser;

/// Identifier used when the backend did not supply one.
pub const JWT_USER_ID: &str = "jwt-user";

/// Identity data the caller vouches for after an external credential
/// exchange.
///
/// The session layer never verifies token signatures, expiry or claims. A
/// `TrustedAssertion` is the caller's statement that the backend already
/// accepted these credentials for this email; treat it as unverified input
/// everywhere else.
#[derive(Debug, Clone)]
pub struct TrustedAssertion {
    email: Email,
    display_name: Option<String>,
    user_id: Option<UserId>,
}

impl TrustedAssertion {
    /// Vouch for `email`.
    #[must_use]
    pub const fn new(email: Email) -> Self {
        Self {
            email,
            display_name: None,
            user_id: None,
        }
    }

    /// Attach a display name, typically built from the profile endpoint.
    ///
    /// Blank names are ignored in favour of the email local part.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Attach the backend's identifier for the user.
    #[must_use]
    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// The vouched-for email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Build the session identity. The role is always [`Role::Author`]:
    /// nothing in this layer derives roles from tokens.
    pub(crate) fn into_user(self) -> SessionUser {
        let display_name = self
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(|| self.email.local_part().to_owned(), str::to_owned);

        SessionUser {
            id: self
                .user_id
                .unwrap_or_else(|| UserId::from_static(JWT_USER_ID)),
            email: self.email,
            display_name,
            role: Role::Author,
        }
    }
}
