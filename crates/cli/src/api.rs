//! Portal backend client for credential exchange.
//!
//! Exchanges an email and password for a token pair, looks up the display
//! name on the profile endpoint, and hands the result to
//! [`SessionStore::login_with_jwt`]. New accounts are created on the
//! registration endpoint and then logged in the same way.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use journal_portal_core::{AccessToken, Email, EmailError, RefreshToken};
use journal_portal_session::{SessionStorage, SessionStore, TrustedAssertion};

/// Token endpoint, relative to the base URL.
const TOKEN_PATH: &str = "/api/users/token/";

/// Profile endpoint, relative to the base URL.
const PROFILE_PATH: &str = "/api/users/profile/";

/// Registration endpoint, relative to the base URL.
const REGISTER_PATH: &str = "/api/users/register/";

/// Shortest password accepted for a new account.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Errors that can occur when talking to the portal backend.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The email is empty.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The backend rejected the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The password is shorter than [`MIN_PASSWORD_LEN`].
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,

    /// The backend refused to create the account.
    #[error("registration rejected: {0}")]
    RegistrationRejected(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an unexpected error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Tokens issued by the token endpoint.
#[derive(Debug)]
pub struct TokenPair {
    pub access: AccessToken,
    pub refresh: Option<RefreshToken>,
}

/// Details for a new portal account.
#[derive(Debug)]
pub struct Registration {
    pub email: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub organization: String,
}

impl Registration {
    /// `"{first} {last}"`, trimmed.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_owned()
    }
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    organization: &'a str,
    biography: &'a str,
}

/// Error body of a rejected registration.
#[derive(Debug, Default, Deserialize)]
struct RegisterErrorResponse {
    #[serde(default)]
    email: Vec<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl RegisterErrorResponse {
    /// First email error, else `detail`, else a generic message.
    fn message(self) -> String {
        self.email
            .into_iter()
            .next()
            .or(self.detail)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| "Registration failed".to_owned())
    }
}

#[derive(Serialize)]
struct ProfileUpdate<'a> {
    first_name: &'a str,
    last_name: &'a str,
    affiliation: &'a str,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProfileResponse {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

impl ProfileResponse {
    /// `"{first} {last}"`, trimmed; `None` when both are blank.
    fn display_name(&self) -> Option<String> {
        let first = self.first_name.as_deref().unwrap_or_default().trim();
        let last = self.last_name.as_deref().unwrap_or_default().trim();
        let name = format!("{first} {last}").trim().to_owned();
        (!name.is_empty()).then_some(name)
    }
}

/// Portal backend API client.
#[derive(Debug, Clone)]
pub struct PortalClient {
    client: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    /// Create a new client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, ExchangeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    /// Exchange credentials for a token pair.
    ///
    /// The email is sent exactly as typed; the backend owns username
    /// matching.
    ///
    /// # Errors
    ///
    /// Returns `ExchangeError::InvalidCredentials` on 400/401, and
    /// `ExchangeError::Api` for any other non-success status.
    pub async fn obtain_tokens(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<TokenPair, ExchangeError> {
        let url = format!("{}{TOKEN_PATH}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&TokenRequest {
                username,
                password: password.expose_secret(),
            })
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::BAD_REQUEST
        {
            tracing::debug!(status = status.as_u16(), "token request rejected");
            return Err(ExchangeError::InvalidCredentials);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ExchangeError::Parse(e.to_string()))?;

        let access =
            AccessToken::new(body.access).map_err(|e| ExchangeError::Parse(e.to_string()))?;
        let refresh = body
            .refresh
            .filter(|token| !token.is_empty())
            .map(RefreshToken::new)
            .transpose()
            .map_err(|e| ExchangeError::Parse(e.to_string()))?;

        Ok(TokenPair { access, refresh })
    }

    /// Fetch the user's display name from the profile endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is not a profile.
    pub async fn fetch_display_name(
        &self,
        access: &AccessToken,
    ) -> Result<Option<String>, ExchangeError> {
        let url = format!("{}{PROFILE_PATH}", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(access.expose())
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let profile: ProfileResponse = response
            .json()
            .await
            .map_err(|e| ExchangeError::Parse(e.to_string()))?;

        Ok(profile.display_name())
    }

    /// Create an account on the registration endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ExchangeError::PasswordTooShort` before any request is made,
    /// `ExchangeError::RegistrationRejected` on a 4xx response (carrying the
    /// backend's email error or `detail`), and `ExchangeError::Api` for any
    /// other non-success status.
    pub async fn register(&self, registration: &Registration) -> Result<(), ExchangeError> {
        let password = registration.password.expose_secret();
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ExchangeError::PasswordTooShort);
        }

        let url = format!("{}{REGISTER_PATH}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&RegisterRequest {
                email: &registration.email,
                password,
                first_name: &registration.first_name,
                last_name: &registration.last_name,
                organization: &registration.organization,
                biography: "",
            })
            .send()
            .await?;
        let status = response.status();

        if status.is_client_error() {
            let body: RegisterErrorResponse = response.json().await.unwrap_or_default();
            let message = body.message();
            tracing::debug!(status = status.as_u16(), %message, "registration rejected");
            return Err(ExchangeError::RegistrationRejected(message));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// Store the profile fields given at registration.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend refuses the update.
    pub async fn update_profile(
        &self,
        access: &AccessToken,
        registration: &Registration,
    ) -> Result<(), ExchangeError> {
        let url = format!("{}{PROFILE_PATH}", self.base_url);
        let response = self
            .client
            .put(&url)
            .bearer_auth(access.expose())
            .json(&ProfileUpdate {
                first_name: &registration.first_name,
                last_name: &registration.last_name,
                affiliation: &registration.organization,
            })
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// Full sign-up flow: registration, token exchange, session write.
    ///
    /// The display name comes from the registration form. The follow-up
    /// profile update is not fatal.
    ///
    /// # Errors
    ///
    /// Returns error if the email is empty, the registration is refused, or
    /// the token exchange fails. The store is untouched in that case.
    pub async fn sign_up<S: SessionStorage>(
        &self,
        store: &mut SessionStore<S>,
        registration: &Registration,
    ) -> Result<(), ExchangeError> {
        let normalized = Email::parse(&registration.email)?;

        tracing::info!(email = %normalized, api = %self.base_url, "registering account");
        self.register(registration).await?;
        let tokens = self
            .obtain_tokens(&registration.email, &registration.password)
            .await?;

        let mut assertion = TrustedAssertion::new(normalized);
        let display_name = registration.display_name();
        if !display_name.is_empty() {
            assertion = assertion.with_display_name(display_name);
        }

        if let Err(e) = self.update_profile(&tokens.access, registration).await {
            tracing::warn!(error = %e, "profile update after registration failed");
        }

        store.login_with_jwt(assertion, tokens.access, tokens.refresh);
        Ok(())
    }

    /// Full login flow: token exchange, profile lookup, session write.
    ///
    /// A failed profile lookup is not fatal; the display name then falls
    /// back to the email local part.
    ///
    /// # Errors
    ///
    /// Returns error if the email is empty or the token exchange fails. The
    /// store is untouched in that case.
    pub async fn log_in<S: SessionStorage>(
        &self,
        store: &mut SessionStore<S>,
        email: &str,
        password: &SecretString,
    ) -> Result<(), ExchangeError> {
        let normalized = Email::parse(email)?;

        tracing::info!(email = %normalized, api = %self.base_url, "requesting tokens");
        let tokens = self.obtain_tokens(email, password).await?;

        let display_name = match self.fetch_display_name(&tokens.access).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(error = %e, "profile lookup failed; using email local part");
                None
            }
        };

        let mut assertion = TrustedAssertion::new(normalized);
        if let Some(name) = display_name {
            assertion = assertion.with_display_name(name);
        }

        store.login_with_jwt(assertion, tokens.access, tokens.refresh);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn profile(first: Option<&str>, last: Option<&str>) -> ProfileResponse {
        ProfileResponse {
            first_name: first.map(str::to_owned),
            last_name: last.map(str::to_owned),
        }
    }

    #[test]
    fn test_display_name_joins_parts() {
        assert_eq!(
            profile(Some(" Jane "), Some("Doe")).display_name().as_deref(),
            Some("Jane Doe")
        );
    }

    #[test]
    fn test_display_name_single_part() {
        assert_eq!(
            profile(None, Some("Doe")).display_name().as_deref(),
            Some("Doe")
        );
        assert_eq!(
            profile(Some("Jane"), Some("")).display_name().as_deref(),
            Some("Jane")
        );
    }

    #[test]
    fn test_display_name_blank() {
        assert_eq!(profile(None, None).display_name(), None);
        assert_eq!(profile(Some("  "), Some("")).display_name(), None);
    }

    #[test]
    fn test_profile_ignores_extra_fields() {
        let parsed: ProfileResponse = serde_json::from_str(
            r#"{"first_name":"Jane","last_name":"Doe","email":"jane@example.com","id":4}"#,
        )
        .unwrap();
        assert_eq!(parsed.display_name().as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_register_error_prefers_email_message() {
        let parsed: RegisterErrorResponse = serde_json::from_str(
            r#"{"email":["user with this email already exists."],"detail":"bad"}"#,
        )
        .unwrap();
        assert_eq!(parsed.message(), "user with this email already exists.");
    }

    #[test]
    fn test_register_error_falls_back_to_detail_then_generic() {
        let parsed: RegisterErrorResponse =
            serde_json::from_str(r#"{"email":[],"detail":"Closed"}"#).unwrap();
        assert_eq!(parsed.message(), "Closed");
        assert_eq!(
            RegisterErrorResponse::default().message(),
            "Registration failed"
        );
    }

    #[test]
    fn test_registration_display_name() {
        let registration = Registration {
            email: "jane@example.com".to_owned(),
            password: SecretString::from("hunter22".to_owned()),
            first_name: " Jane".to_owned(),
            last_name: String::new(),
            organization: String::new(),
        };
        assert_eq!(registration.display_name(), "Jane");
    }

    #[test]
    fn test_new_trims_base_url() {
        let url = Url::parse("https://journal.example/").unwrap();
        let client = PortalClient::new(&url, Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "https://journal.example");
    }
}
