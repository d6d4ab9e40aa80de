//! Bearer credential types.
//!
//! Tokens are opaque to the portal: they are issued by the backend and never
//! inspected, only stored and attached to outgoing requests. Both wrappers
//! keep their value in a [`SecretString`] so that `Debug` output and logs
//! never contain the credential.

use secrecy::{ExposeSecret, SecretString};

/// Errors that can occur when constructing a token.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token string is empty.
    #[error("token cannot be empty")]
    Empty,
}

/// Short-lived bearer credential for authenticated API calls.
#[derive(Debug)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wrap a non-empty token string.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Empty`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, TokenError> {
        let token = token.into();
        if token.is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Self(SecretString::from(token)))
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Returns the value for an `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

/// Long-lived credential used to mint new access tokens.
///
/// Stored alongside the session for a collaborator to use; nothing in the
/// session layer rotates it.
#[derive(Debug)]
pub struct RefreshToken(SecretString);

impl RefreshToken {
    /// Wrap a non-empty token string.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Empty`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, TokenError> {
        let token = token.into();
        if token.is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Self(SecretString::from(token)))
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
