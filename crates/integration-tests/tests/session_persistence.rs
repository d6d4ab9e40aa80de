//! Session persistence across process restarts.
//!
//! Each test opens a new store over the same directory to simulate a reload.

#![allow(clippy::unwrap_used)]

use std::fs;

use journal_portal_core::{AccessToken, Email, RefreshToken, Role};
use journal_portal_integration_tests::SessionDir;
use journal_portal_session::{TrustedAssertion, keys};

fn jwt_login(dir: &SessionDir, email: &str, token: &str, refresh: Option<&str>) {
    let mut store = dir.open();
    store.login_with_jwt(
        TrustedAssertion::new(Email::parse(email).unwrap()),
        AccessToken::new(token).unwrap(),
        refresh.map(|r| RefreshToken::new(r).unwrap()),
    );
}

// =============================================================================
// Round Trips
// =============================================================================

#[test]
fn test_fresh_directory_is_anonymous() {
    let dir = SessionDir::new();
    let store = dir.open();

    assert!(store.is_ready());
    assert!(!store.is_authenticated());
    assert!(!dir.path().exists());
}

#[test]
fn test_jwt_session_survives_restart() {
    let dir = SessionDir::new();
    jwt_login(&dir, "Jane.Doe@Example.com", "tok123", Some("ref456"));

    let store = dir.open();
    let session = store.session().unwrap();
    assert_eq!(session.user().email.as_str(), "jane.doe@example.com");
    assert_eq!(session.user().display_name, "jane.doe");
    assert_eq!(session.user().role, Role::Author);
    assert_eq!(session.access_token().expose(), "tok123");
    assert_eq!(session.refresh_token().unwrap().expose(), "ref456");
}

#[test]
fn test_demo_session_survives_restart() {
    let dir = SessionDir::new();
    assert!(dir.open().login("admin@journal.com", "whatever"));

    let store = dir.open();
    assert_eq!(store.user().unwrap().role, Role::Admin);
    assert!(store.authorization_header().is_some());
}

#[test]
fn test_files_on_disk() {
    let dir = SessionDir::new();
    jwt_login(&dir, "jane@example.com", "tok", Some("ref"));

    let user: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("auth.user")).unwrap()).unwrap();
    assert_eq!(user["email"], "jane@example.com");
    assert_eq!(user["username"], "jane");
    assert_eq!(user["role"], "author");
    assert_eq!(
        fs::read_to_string(dir.path().join("auth.access")).unwrap(),
        "tok"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("auth.refresh")).unwrap(),
        "ref"
    );
}

// =============================================================================
// Logout
// =============================================================================

#[test]
fn test_logout_survives_restart() {
    let dir = SessionDir::new();
    jwt_login(&dir, "jane@example.com", "tok", Some("ref"));

    let mut store = dir.open();
    store.logout();
    assert!(!store.is_authenticated());

    let store = dir.open();
    assert!(!store.is_authenticated());
    let status = store.status();
    assert!(!status.stored.user && !status.stored.access && !status.stored.refresh);
}

#[test]
fn test_logout_keeps_unrelated_files() {
    let dir = SessionDir::new();
    jwt_login(&dir, "jane@example.com", "tok", None);
    fs::write(dir.path().join("lang"), "tr").unwrap();

    dir.open().logout();

    assert!(dir.path().join("lang").exists());
    assert!(!dir.path().join("auth.user").exists());
}

#[test]
fn test_failed_token_write_leaves_nothing_after_logout() {
    let dir = SessionDir::new();
    jwt_login(&dir, "jane@example.com", "first", None);

    // A directory in place of the token file makes the final rename fail.
    let access = dir.path().join("auth.access");
    fs::remove_file(&access).unwrap();
    fs::create_dir(&access).unwrap();
    fs::write(access.join("blocker"), "x").unwrap();

    let mut store = dir.open();
    store.login_with_jwt(
        TrustedAssertion::new(Email::parse("jane@example.com").unwrap()),
        AccessToken::new("SECRET").unwrap(),
        None,
    );
    store.logout();

    assert!(!dir.path().join("auth.access.tmp").exists());
    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        if path.is_file() {
            assert!(!fs::read_to_string(&path).unwrap().contains("SECRET"));
        }
    }
}

// =============================================================================
// Corruption
// =============================================================================

#[test]
fn test_corrupt_user_file_is_purged() {
    let dir = SessionDir::new();
    jwt_login(&dir, "jane@example.com", "tok", Some("ref"));
    fs::write(dir.path().join("auth.user"), "\u{0}garbage").unwrap();

    let store = dir.open();
    assert!(store.is_ready());
    assert!(!store.is_authenticated());
    for key in keys::ALL {
        let file = dir.path().join(key.replace(':', "."));
        assert!(!file.exists(), "{key} should be purged");
    }
}

#[test]
fn test_missing_token_file_is_purged() {
    let dir = SessionDir::new();
    jwt_login(&dir, "jane@example.com", "tok", None);
    fs::remove_file(dir.path().join("auth.access")).unwrap();

    let store = dir.open();
    assert!(!store.is_authenticated());
    assert!(!dir.path().join("auth.user").exists());
}

#[test]
fn test_new_login_replaces_previous_session() {
    let dir = SessionDir::new();
    jwt_login(&dir, "old@example.com", "old", Some("old-ref"));
    jwt_login(&dir, "new@example.com", "new", None);

    let store = dir.open();
    let session = store.session().unwrap();
    assert_eq!(session.user().email.as_str(), "new@example.com");
    assert_eq!(session.access_token().expose(), "new");
    assert!(session.refresh_token().is_none());
}
