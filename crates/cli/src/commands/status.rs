//! Session inspection commands.

use std::fmt::Write as _;

use journal_portal_session::{SessionStatus, SessionStorage, SessionStore};

use super::CommandError;

/// Render the session status.
///
/// Plain text by default, or a JSON object with `json`.
///
/// # Errors
///
/// Returns `CommandError::Io` if JSON encoding fails.
pub fn status<S: SessionStorage>(store: &SessionStore<S>, json: bool) -> Result<String, CommandError> {
    let status = store.status();
    if json {
        return serde_json::to_string_pretty(&status).map_err(|e| CommandError::Io(e.into()));
    }
    Ok(render(&status))
}

/// The `Authorization` header value for scripting.
///
/// # Errors
///
/// Returns `CommandError::NotLoggedIn` when there is no session.
pub fn token<S: SessionStorage>(store: &SessionStore<S>) -> Result<String, CommandError> {
    store.authorization_header().ok_or(CommandError::NotLoggedIn)
}

fn mark(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn render(status: &SessionStatus) -> String {
    let none = "none";
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "Ready:         {}", mark(status.ready));
    let _ = writeln!(out, "Authenticated: {}", mark(status.authenticated));
    let _ = writeln!(out, "User:          {}", status.display_name.as_deref().unwrap_or(none));
    let _ = writeln!(out, "Email:         {}", status.email.as_deref().unwrap_or(none));
    let _ = writeln!(
        out,
        "Role:          {}",
        status.role.map_or(none, journal_portal_core::Role::as_str)
    );
    let _ = writeln!(out, "Stored keys:");
    let _ = writeln!(out, "  auth:user     {}", mark(status.stored.user));
    let _ = writeln!(out, "  auth:access   {}", mark(status.stored.access));
    let _ = write!(out, "  auth:refresh  {}", mark(status.stored.refresh));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use journal_portal_session::MemoryStorage;

    #[test]
    fn test_status_anonymous() {
        let store = SessionStore::open(MemoryStorage::new());
        let out = status(&store, false).unwrap();
        assert!(out.contains("Ready:         yes"));
        assert!(out.contains("Authenticated: no"));
        assert!(out.contains("Role:          none"));
        assert!(out.contains("auth:access   no"));
    }

    #[test]
    fn test_status_json() {
        let mut store = SessionStore::open(MemoryStorage::new());
        store.login("someone@else.com", "");

        let out = status(&store, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["authenticated"], true);
        assert_eq!(value["role"], "author");
        assert_eq!(value["stored"]["refresh"], false);
        assert!(!out.contains("demo-"));
    }

    #[test]
    fn test_token_requires_session() {
        let store = SessionStore::open(MemoryStorage::new());
        assert!(matches!(token(&store), Err(CommandError::NotLoggedIn)));
    }

    #[test]
    fn test_token() {
        let mut store = SessionStore::open(MemoryStorage::new());
        store.login("someone@else.com", "");
        assert!(token(&store).unwrap().starts_with("Bearer demo-"));
    }
}
