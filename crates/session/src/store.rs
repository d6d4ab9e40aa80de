//! The session store.

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use journal_portal_core::{AccessToken, Email, RefreshToken, Role, UserId};

use crate::error::{HydrateError, PersistError};
use crate::models::keys;
use crate::{Session, SessionStatus, SessionStorage, SessionUser, StoredKeys, TrustedAssertion};

/// Email that the offline demo login maps to [`Role::Admin`].
pub const DEMO_ADMIN_EMAIL: &str = "admin@journal.com";

const DEMO_ADMIN_ID: &str = "admin-user-id";
const DEMO_AUTHOR_ID: &str = "author-user-id";
const DEMO_TOKEN_PREFIX: &str = "demo-";

/// Lifecycle state of a [`SessionStore`].
#[derive(Debug, Default)]
pub enum SessionState {
    /// Persisted state has not been loaded yet.
    #[default]
    Hydrating,
    /// Nobody is logged in.
    Anonymous,
    /// A session is active.
    Authenticated(Session),
}

/// Single authoritative holder of the current session.
///
/// Construct one per process and hand out `&SessionStore` to read-only
/// consumers; identity changes go through [`login`](Self::login),
/// [`login_with_jwt`](Self::login_with_jwt) and [`logout`](Self::logout).
///
/// Every mutation is written through to the storage backend before the call
/// returns. Storage is read only by [`hydrate`](Self::hydrate). None of the
/// operations fail: storage problems are logged and the store falls back to
/// a well-defined state.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    state: SessionState,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Create a store in the [`SessionState::Hydrating`] state.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            state: SessionState::Hydrating,
        }
    }

    /// Create a store and hydrate it immediately.
    #[must_use]
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.hydrate();
        store
    }

    /// Load the persisted session.
    ///
    /// Only the first call has an effect. A complete, well-formed record
    /// makes the store authenticated; no record makes it anonymous. Anything
    /// else, including a storage read failure, is treated as corruption: all
    /// session keys are removed and the store starts anonymous.
    pub fn hydrate(&mut self) {
        if self.is_ready() {
            debug!("session already hydrated");
            return;
        }

        self.state = match self.load() {
            Ok(Some(session)) => {
                info!(
                    email = %session.user.email,
                    role = %session.user.role,
                    "restored persisted session"
                );
                SessionState::Authenticated(session)
            }
            Ok(None) => {
                debug!("no persisted session");
                SessionState::Anonymous
            }
            Err(e) => {
                warn!(error = %e, "discarding persisted session");
                self.purge();
                SessionState::Anonymous
            }
        };
    }

    /// Offline demo login.
    ///
    /// No network service is contacted and the password is ignored.
    /// [`DEMO_ADMIN_EMAIL`] becomes an admin, any other address an author.
    /// Returns `false`, leaving the current session untouched, when `email`
    /// is empty.
    pub fn login(&mut self, email: &str, _password: &str) -> bool {
        let Ok(email) = Email::parse(email) else {
            debug!("demo login rejected: empty email");
            return false;
        };

        let (id, display_name, role) = if email.as_str() == DEMO_ADMIN_EMAIL {
            (DEMO_ADMIN_ID, "Admin", Role::Admin)
        } else {
            (DEMO_AUTHOR_ID, "Author", Role::Author)
        };

        let Ok(access_token) = AccessToken::new(format!("{DEMO_TOKEN_PREFIX}{}", Uuid::new_v4()))
        else {
            return false;
        };

        let user = SessionUser {
            id: UserId::from_static(id),
            email,
            display_name: display_name.to_owned(),
            role,
        };

        info!(email = %user.email, role = %user.role, "demo login");
        self.establish(Session {
            user,
            access_token,
            refresh_token: None,
        });
        true
    }

    /// Log in with tokens obtained from an external credential exchange.
    ///
    /// The assertion is trusted as-is: the token is neither decoded nor
    /// checked for expiry. The role is always [`Role::Author`]. A refresh
    /// token left over from an earlier session is removed when none is
    /// supplied.
    pub fn login_with_jwt(
        &mut self,
        assertion: TrustedAssertion,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
    ) {
        let user = assertion.into_user();

        info!(
            email = %user.email,
            display_name = %user.display_name,
            has_refresh_token = refresh_token.is_some(),
            "jwt login"
        );
        self.establish(Session {
            user,
            access_token,
            refresh_token,
        });
    }

    /// End the session and remove every persisted session key.
    ///
    /// The in-memory session is cleared first, so a failed removal can never
    /// leave a credential attached to later requests.
    pub fn logout(&mut self) {
        let previous = std::mem::replace(&mut self.state, SessionState::Anonymous);
        self.purge();

        match previous {
            SessionState::Authenticated(session) => {
                info!(email = %session.user.email, "logged out");
            }
            _ => debug!("logout without an active session"),
        }
    }

    /// Whether persisted state has been loaded. Consumers must not treat
    /// [`is_authenticated`](Self::is_authenticated) as authoritative before
    /// this returns `true`.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        !matches!(self.state, SessionState::Hydrating)
    }

    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// The active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.session().map(Session::user)
    }

    /// The access token to attach to outgoing requests, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.session().map(Session::access_token)
    }

    /// `Authorization` header value for the active session.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        self.access_token().map(AccessToken::bearer)
    }

    /// Snapshot of the in-memory state and which keys are stored.
    ///
    /// Keys that cannot be read are reported as absent.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        let present = |key: &str| self.storage.contains(key).unwrap_or(false);
        let user = self.user();

        SessionStatus {
            ready: self.is_ready(),
            authenticated: self.is_authenticated(),
            display_name: user.map(|u| u.display_name.clone()),
            email: user.map(|u| u.email.to_string()),
            role: user.map(|u| u.role),
            stored: StoredKeys {
                user: present(keys::USER),
                access: present(keys::ACCESS_TOKEN),
                refresh: present(keys::REFRESH_TOKEN),
            },
        }
    }

    /// Borrow the storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return its storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn load(&self) -> Result<Option<Session>, HydrateError> {
        let user = self.storage.get(keys::USER)?;
        let access = self.storage.get(keys::ACCESS_TOKEN)?;
        let refresh = self.storage.get(keys::REFRESH_TOKEN)?;

        match (user, access) {
            (None, None) if refresh.is_some() => {
                Err(HydrateError::Incomplete("refresh token without a session"))
            }
            (None, None) => Ok(None),
            (Some(_), None) => Err(HydrateError::Incomplete("user record without an access token")),
            (None, Some(_)) => Err(HydrateError::Incomplete("access token without a user record")),
            (Some(raw_user), Some(raw_access)) => {
                let mut user: SessionUser = serde_json::from_str(&raw_user)?;
                if user.display_name.trim().is_empty() {
                    user.display_name = user.email.local_part().to_owned();
                }
                let access_token = AccessToken::new(raw_access)?;
                let refresh_token = refresh.map(RefreshToken::new).transpose()?;

                Ok(Some(Session {
                    user,
                    access_token,
                    refresh_token,
                }))
            }
        }
    }

    fn establish(&mut self, session: Session) {
        if let Err(e) = self.persist(&session) {
            error!(error = %e, "failed to persist session; clearing stored keys");
            self.purge();
        }
        self.state = SessionState::Authenticated(session);
    }

    fn persist(&mut self, session: &Session) -> Result<(), PersistError> {
        let record = serde_json::to_string(&session.user)?;

        self.storage.set(keys::USER, &record)?;
        self.storage
            .set(keys::ACCESS_TOKEN, session.access_token.expose())?;
        match &session.refresh_token {
            Some(token) => self.storage.set(keys::REFRESH_TOKEN, token.expose())?,
            None => self.storage.remove(keys::REFRESH_TOKEN)?,
        }

        debug!("session written to storage");
        Ok(())
    }

    fn purge(&mut self) {
        for key in keys::ALL {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "failed to remove stored session key");
            }
        }
    }
}
