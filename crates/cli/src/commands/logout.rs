//! Logout command.

use journal_portal_session::{SessionStorage, SessionStore};

/// End the session and clear stored credentials.
///
/// Returns a confirmation line.
pub fn logout<S: SessionStorage>(store: &mut SessionStore<S>) -> String {
    let was_authenticated = store.is_authenticated();
    store.logout();

    if was_authenticated {
        "Logged out".to_owned()
    } else {
        "Not logged in; cleared stored session data".to_owned()
    }
}
