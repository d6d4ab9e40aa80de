//! Register command.
//!
//! # Usage
//!
//! ```bash
//! # Create an account and log in (password from PORTAL_PASSWORD or stdin)
//! jp-cli register -e jane.doe@example.com --first-name Jane --last-name Doe \
//!     --organization "Example University"
//! ```

use journal_portal_session::{SessionStorage, SessionStore};

use super::CommandError;
use super::login::greeting;
use crate::api::{PortalClient, Registration};

/// Create an account, log in, and persist the session.
///
/// Returns a confirmation line.
///
/// # Errors
///
/// Returns `CommandError::Exchange` if the backend refuses the account or
/// the follow-up login.
pub async fn register<S: SessionStorage>(
    store: &mut SessionStore<S>,
    client: &PortalClient,
    registration: &Registration,
) -> Result<String, CommandError> {
    client.sign_up(store, registration).await?;
    Ok(greeting(store))
}
