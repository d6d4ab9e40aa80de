//! Diagnostic snapshot of the session layer.

use serde::Serialize;

use journal_portal_core::Role;

/// Which session keys are currently present in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StoredKeys {
    /// `auth:user` is present.
    pub user: bool,
    /// `auth:access` is present.
    pub access: bool,
    /// `auth:refresh` is present.
    pub refresh: bool,
}

/// Point-in-time view of the store for debugging and `status` output.
///
/// Never contains token values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub ready: bool,
    pub authenticated: bool,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub stored: StoredKeys,
}
