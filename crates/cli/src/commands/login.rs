//! Login commands.
//!
//! # Usage
//!
//! ```bash
//! # Log in against the portal backend
//! jp-cli login -e jane.doe@example.com
//!
//! # Offline demo login (no backend)
//! jp-cli demo-login -e admin@journal.com
//! ```

use secrecy::SecretString;

use journal_portal_session::{SessionStorage, SessionStore};

use super::CommandError;
use crate::api::PortalClient;

/// Log in through the backend and persist the session.
///
/// Returns a confirmation line.
///
/// # Errors
///
/// Returns `CommandError::Exchange` if the backend rejects the login.
pub async fn login<S: SessionStorage>(
    store: &mut SessionStore<S>,
    client: &PortalClient,
    email: &str,
    password: &SecretString,
) -> Result<String, CommandError> {
    client.log_in(store, email, password).await?;
    Ok(greeting(store))
}

/// Offline demo login.
///
/// # Errors
///
/// Returns `CommandError::EmptyEmail` if `email` is empty; the existing
/// session is kept.
pub fn demo_login<S: SessionStorage>(
    store: &mut SessionStore<S>,
    email: &str,
) -> Result<String, CommandError> {
    if !store.login(email, "") {
        return Err(CommandError::EmptyEmail);
    }
    Ok(greeting(store))
}

pub(crate) fn greeting<S: SessionStorage>(store: &SessionStore<S>) -> String {
    store.user().map_or_else(
        || "Not logged in".to_owned(),
        |user| format!("Logged in as {} <{}> ({})", user.display_name, user.email, user.role),
    )
}
