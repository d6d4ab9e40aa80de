//! Command implementations.
//!
//! Each command operates on a [`SessionStore`](journal_portal_session::SessionStore)
//! that the caller has already hydrated, and returns what should be printed
//! instead of printing it.

pub mod login;
pub mod logout;
pub mod register;
pub mod status;

use thiserror::Error;

use crate::api::ExchangeError;

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Credential exchange with the backend failed.
    #[error("{0}")]
    Exchange(#[from] ExchangeError),

    /// The demo login was given an empty email.
    #[error("email is required")]
    EmptyEmail,

    /// A password was neither passed nor available on stdin.
    #[error("password is required")]
    MissingPassword,

    /// The command needs an active session.
    #[error("not logged in")]
    NotLoggedIn,

    /// Reading input or encoding output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
