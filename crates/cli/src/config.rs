//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `PORTAL_API_BASE_URL` - Portal backend base URL (default: <http://127.0.0.1:8000>)
//! - `PORTAL_SESSION_DIR` - Directory holding the persisted session
//!   (default: `.journal-portal/session`)
//! - `PORTAL_HTTP_TIMEOUT_SECS` - HTTP request timeout in seconds (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_SESSION_DIR: &str = ".journal-portal/session";
const DEFAULT_HTTP_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Portal backend base URL, without a trailing slash
    pub api_base_url: Url,
    /// Directory for the file-backed session storage
    pub session_dir: PathBuf,
    /// Timeout applied to every HTTP request
    pub http_timeout: Duration,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            api_base_url: parse_base_url(&get_or_default(
                "PORTAL_API_BASE_URL",
                DEFAULT_API_BASE_URL,
            ))?,
            session_dir: PathBuf::from(get_or_default("PORTAL_SESSION_DIR", DEFAULT_SESSION_DIR)),
            http_timeout: parse_timeout(&get_or_default(
                "PORTAL_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            ))?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the backend URL, dropping any trailing slash so paths can be joined.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("PORTAL_API_BASE_URL".to_string(), reason);

    let url = Url::parse(value.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme: {}", url.scheme())));
    }
    Ok(url)
}

/// Parse a positive number of seconds.
fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidEnvVar("PORTAL_HTTP_TIMEOUT_SECS".to_string(), reason)
    };

    match value.parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero".to_string())),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(invalid(e.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config.api_base_url.host_str(), Some("127.0.0.1"));
        assert_eq!(config.api_base_url.port(), Some(8000));
        assert_eq!(config.session_dir, PathBuf::from(".journal-portal/session"));
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides_from_variables() {
        let config = from_vars(&[
            ("PORTAL_API_BASE_URL", "https://journal.example/"),
            ("PORTAL_SESSION_DIR", "/var/lib/jp"),
            ("PORTAL_HTTP_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url.host_str(), Some("journal.example"));
        assert_eq!(config.session_dir, PathBuf::from("/var/lib/jp"));
        assert_eq!(config.http_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_variable_names_key() {
        let err = from_vars(&[("PORTAL_HTTP_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PORTAL_HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn test_parse_base_url_trims_trailing_slash() {
        let url = parse_base_url("https://api.journal.example/").unwrap();
        assert_eq!(url.as_str().trim_end_matches('/'), "https://api.journal.example");
        assert_eq!(url.host_str(), Some("api.journal.example"));
    }

    #[test]
    fn test_parse_base_url_keeps_path_prefix() {
        let url = parse_base_url("https://journal.example/backend/").unwrap();
        assert_eq!(url.path(), "/backend");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(parse_base_url("ftp://journal.example").is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("10").unwrap(), Duration::from_secs(10));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("-1").is_err());
        assert!(parse_timeout("soon").is_err());
    }
}
