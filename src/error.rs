//! Error types for the HighLevel SDK
//!
//! This module defines the error hierarchy for the entire SDK.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use reqwest::header::HeaderMap;
use serde_json::Value;
use thiserror::Error;

/// The main error type for the HighLevel SDK
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Token refresh failed: {message}")]
    TokenRefresh { message: String },

    #[error("OAuth2 error: {message}")]
    OAuth2 { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Request(Box<RequestError>),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Object Errors
    // ============================================================================
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("{entity} must have an id to get endpoint")]
    MissingId { entity: &'static str },

    #[error("{entity} does not have an endpoint")]
    NoEndpoint { entity: &'static str },

    #[error("{entity} is not bound to a session")]
    MissingSession { entity: &'static str },

    // ============================================================================
    // Arrow/Parquet Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Context captured when the API answers with a status of 400 or above
#[derive(Debug, Clone)]
pub struct RequestError {
    /// HTTP method of the failed call
    pub method: String,
    /// Full URL of the failed call
    pub url: String,
    /// Parameters sent with the call (query or body)
    pub params: Value,
    /// Request headers, with the bearer token redacted
    pub request_headers: Vec<(String, String)>,
    /// Response headers
    pub response_headers: HeaderMap,
    /// Response status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Call to HighLevel API was unsuccessful: {} {} returned HTTP {}: {}",
            self.method, self.url, self.status, self.body
        )
    }
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Wrap API failure context
    pub fn request(error: RequestError) -> Self {
        Self::Request(Box::new(error))
    }

    /// HTTP status of an API failure, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request(e) => Some(e.status),
            _ => None,
        }
    }

    /// Check if this error is retryable
    ///
    /// Only transport-level failures are retried. An HTTP status, however bad,
    /// is an answer from the API and is surfaced as-is. A request that could
    /// not be built fails the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Http(e) if !e.is_builder())
    }
}

/// Result type alias for the HighLevel SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request_error(status: u16) -> RequestError {
        RequestError {
            method: "GET".to_string(),
            url: "https://services.leadconnectorhq.com/contacts/".to_string(),
            params: serde_json::json!({"locationId": "loc_1"}),
            request_headers: vec![("Authorization".to_string(), "Bearer ***".to_string())],
            response_headers: HeaderMap::new(),
            status,
            body: "{\"message\":\"Unauthorized\"}".to_string(),
        }
    }

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("client_id");
        assert_eq!(err.to_string(), "Missing required config field: client_id");

        let err = Error::MissingId { entity: "Contact" };
        assert_eq!(err.to_string(), "Contact must have an id to get endpoint");

        let err = Error::NoEndpoint { entity: "Agency" };
        assert_eq!(err.to_string(), "Agency does not have an endpoint");
    }

    #[test]
    fn test_request_error_display() {
        let err = Error::request(sample_request_error(401));
        let text = err.to_string();
        assert!(text.contains("HTTP 401"));
        assert!(text.contains("GET https://services.leadconnectorhq.com/contacts/"));
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_is_retryable() {
        assert!(!Error::request(sample_request_error(500)).is_retryable());
        assert!(!Error::request(sample_request_error(429)).is_retryable());
        assert!(!Error::config("test").is_retryable());
        assert!(!Error::invalid_argument("test").is_retryable());
    }

    #[test]
    fn test_builder_error_is_not_retryable() {
        let err = reqwest::Client::new().get("not a url").build().unwrap_err();
        assert!(err.is_builder());
        assert!(!Error::Http(err).is_retryable());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
