//! SDK configuration
//!
//! Holds the API endpoints, the OAuth application credentials and the
//! HTTP retry settings. Values come from defaults, environment variables
//! (optionally seeded from a `.env` file) or a YAML file.

use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default REST API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://services.leadconnectorhq.com";

/// Default marketplace URL used for the OAuth consent screen
pub const DEFAULT_AUTH_BASE_URL: &str = "https://marketplace.gohighlevel.com";

/// API version pin sent with every request
pub const DEFAULT_API_VERSION: &str = "2021-07-28";

/// Default OAuth redirect URI (served by `highlevel serve`)
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/oauth/callback";

/// Scopes requested by default during authorization
pub const DEFAULT_SCOPES: &[&str] = &[
    "businesses.readonly",
    "calendars.readonly",
    "contacts.readonly",
    "contacts.write",
    "locations.readonly",
    "locations.write",
    "opportunities.readonly",
    "opportunities.write",
    "calendars/events.readonly",
    "calendars/events.write",
    "users.readonly",
    "users.write",
    "conversations.readonly",
    "conversations/message.readonly",
    "locations/customFields.readonly",
    "forms.readonly",
    "surveys.readonly",
    "workflows.readonly",
];

// ============================================================================
// SDK Config
// ============================================================================

/// Complete SDK configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// Base URL for API requests
    pub api_base_url: String,

    /// Base URL for the OAuth consent screen
    pub auth_base_url: String,

    /// Value of the `Version` header
    pub api_version: String,

    /// OAuth application client id
    pub client_id: Option<String>,

    /// OAuth application client secret
    pub client_secret: Option<String>,

    /// OAuth redirect URI
    pub redirect_uri: String,

    /// OAuth scopes
    pub scopes: Vec<String>,

    /// HTTP client settings
    pub http: HttpConfig,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            client_id: None,
            client_secret: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(ToString::to_string).collect(),
            http: HttpConfig::default(),
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts per call on transport failures
    pub max_attempts: u32,

    /// Delay before the first retry (milliseconds)
    pub initial_backoff_ms: u64,

    /// Upper bound for a single retry delay (milliseconds)
    pub max_backoff_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_attempts: 3,
            initial_backoff_ms: 3000,
            max_backoff_ms: 60_000,
        }
    }
}

impl SdkConfig {
    /// Load configuration from the environment
    ///
    /// A `.env` file in the working directory is read first when present.
    /// Recognized variables: `GHL_CLIENT_ID`, `GHL_CLIENT_SECRET`,
    /// `GHL_API_BASE_URL`, `GHL_REDIRECT_URI`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("GHL_CLIENT_ID").none_if_empty() {
            self.client_id = Some(v);
        }
        if let Some(v) = lookup("GHL_CLIENT_SECRET").none_if_empty() {
            self.client_secret = Some(v);
        }
        if let Some(v) = lookup("GHL_API_BASE_URL").none_if_empty() {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("GHL_REDIRECT_URI").none_if_empty() {
            self.redirect_uri = v;
        }
        self
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// OAuth client id, or an error naming the missing field
    pub fn require_client_id(&self) -> Result<&str> {
        self.client_id
            .as_deref()
            .ok_or_else(|| Error::missing_field("client_id"))
    }

    /// OAuth client secret, or an error naming the missing field
    pub fn require_client_secret(&self) -> Result<&str> {
        self.client_secret
            .as_deref()
            .ok_or_else(|| Error::missing_field("client_secret"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = SdkConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api_version, "2021-07-28");
        assert_eq!(config.http.max_attempts, 3);
        assert_eq!(config.http.initial_backoff_ms, 3000);
        assert!(config.scopes.contains(&"contacts.readonly".to_string()));
        assert!(config.client_id.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GHL_CLIENT_ID", "client-123"),
            ("GHL_CLIENT_SECRET", "secret"),
            ("GHL_API_BASE_URL", ""),
        ]
        .into_iter()
        .collect();

        let config =
            SdkConfig::default().with_env_overrides(|k| vars.get(k).map(|v| (*v).to_string()));

        assert_eq!(config.client_id.as_deref(), Some("client-123"));
        assert_eq!(config.client_secret.as_deref(), Some("secret"));
        // Empty values leave defaults untouched
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = r"
api_base_url: http://localhost:9999
client_id: abc
http:
  max_attempts: 5
";
        let config = SdkConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9999");
        assert_eq!(config.client_id.as_deref(), Some("abc"));
        assert_eq!(config.http.max_attempts, 5);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let err = SdkConfig::from_yaml_file("/nonexistent/highlevel.yaml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_require_credentials() {
        let config = SdkConfig::default();
        assert!(matches!(
            config.require_client_id(),
            Err(Error::MissingConfigField { .. })
        ));
        assert!(matches!(
            config.require_client_secret(),
            Err(Error::MissingConfigField { .. })
        ));
    }
}
