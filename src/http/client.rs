//! HTTP transport with retry
//!
//! Provides the single-call transport used by every request:
//! - Bearer authentication and the API version header
//! - Query-string or JSON-body parameter encoding depending on the method
//! - Automatic retries with exponential backoff on transport failures
//! - Conversion of HTTP error statuses into typed request errors

use crate::auth::Credentials;
use crate::config::{SdkConfig, DEFAULT_API_BASE_URL, DEFAULT_API_VERSION};
use crate::error::{Error, RequestError, Result};
use crate::types::{JsonObject, JsonValue, Method};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Value of the `Version` header
    pub api_version: String,
    /// Request timeout
    pub timeout: Duration,
    /// Attempts per call (first try included)
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            initial_backoff: Duration::from_secs(3),
            max_backoff: Duration::from_secs(60),
            user_agent: format!("highlevel-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&SdkConfig> for HttpClientConfig {
    fn from(config: &SdkConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            api_version: config.api_version.clone(),
            timeout: Duration::from_secs(config.http.timeout_secs),
            max_attempts: config.http.max_attempts,
            initial_backoff: Duration::from_millis(config.http.initial_backoff_ms),
            max_backoff: Duration::from_millis(config.http.max_backoff_ms),
            ..Self::default()
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the API version header value
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max attempts
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Description of the call that produced a response
#[derive(Debug, Clone)]
pub struct CallContext {
    /// HTTP method
    pub method: Method,
    /// Full request URL
    pub url: String,
    /// Parameters as sent
    pub params: JsonValue,
    /// Request headers, bearer token redacted
    pub headers: Vec<(String, String)>,
}

/// A completed API call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    headers: HeaderMap,
    body: String,
    call: CallContext,
}

impl ApiResponse {
    /// Assemble a response from its parts
    pub fn new(status: u16, headers: HeaderMap, body: String, call: CallContext) -> Self {
        Self {
            status,
            headers,
            body,
            call,
        }
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The call that produced this response
    pub fn call(&self) -> &CallContext {
        &self.call
    }

    /// Raw body text
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Body parsed as JSON
    pub fn json(&self) -> Result<JsonValue> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Whether the API answered with an error status
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// The typed error for an error response, `None` otherwise
    pub fn error(&self) -> Option<Error> {
        if !self.is_error() {
            return None;
        }
        Some(Error::request(RequestError {
            method: self.call.method.to_string(),
            url: self.call.url.clone(),
            params: self.call.params.clone(),
            request_headers: self.call.headers.clone(),
            response_headers: self.headers.clone(),
            status: self.status,
            body: self.body.clone(),
        }))
    }
}

/// HTTP transport for the HighLevel API
#[derive(Clone)]
pub struct HighLevelClient {
    client: Client,
    config: HttpClientConfig,
}

impl HighLevelClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Build the headers sent with every call
    pub fn build_headers(&self, access_token: &str) -> Result<HeaderMap> {
        if access_token.is_empty() {
            return Err(Error::auth("Must provide access token"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("version"),
            HeaderValue::from_str(&self.config.api_version)
                .map_err(|e| Error::config(format!("Invalid API version header: {e}")))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {access_token}"))
                .map_err(|e| Error::auth(format!("Invalid access token: {e}")))?,
        );
        Ok(headers)
    }

    /// Issue one API call, retrying transport failures
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        credentials: &Credentials,
        params: &JsonObject,
    ) -> Result<ApiResponse> {
        let url = self.build_url(path);
        let headers = self.build_headers(&credentials.access_token)?;
        let query = if method.uses_query() {
            query_pairs(params)
        } else {
            Vec::new()
        };
        let max_attempts = self.config.max_attempts.max(1);

        let mut attempt = 0;
        let response = loop {
            let mut req = self
                .client
                .request(method.into(), &url)
                .headers(headers.clone());

            if method.uses_query() {
                if !query.is_empty() {
                    req = req.query(&query);
                }
            } else {
                req = req.json(params);
            }

            match req.send().await {
                Ok(response) => break response,
                Err(e) => {
                    let err = Error::Http(e);
                    attempt += 1;
                    if !err.is_retryable() {
                        return Err(err);
                    }
                    if attempt >= max_attempts {
                        warn!("{} {} failed after {} attempts: {}", method, url, attempt, err);
                        return Err(err);
                    }
                    let delay = self.calculate_backoff(attempt - 1);
                    warn!(
                        "Request error, attempt {}/{}, retrying in {:?}: {}",
                        attempt, max_attempts, delay, err
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        };

        let status = response.status().as_u16();
        let response_headers = response.headers().clone();
        let body = response.text().await?;

        let api_response = ApiResponse::new(
            status,
            response_headers,
            body,
            CallContext {
                method,
                url,
                params: JsonValue::Object(params.clone()),
                headers: redact_headers(&headers),
            },
        );

        if let Some(err) = api_response.error() {
            debug!("{} {} returned {}", method, api_response.call.url, status);
            return Err(err);
        }

        debug!("Request succeeded: {} {}", method, api_response.call.url);
        Ok(api_response)
    }

    /// Build full URL from path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Calculate backoff delay for a given retry (0-based)
    pub fn calculate_backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        let delay = self.config.initial_backoff.saturating_mul(factor);
        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for HighLevelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighLevelClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Encode a parameter bag as query pairs
///
/// Nulls are omitted, arrays repeat the key per element and nested
/// objects are sent as JSON text.
pub fn query_pairs(params: &JsonObject) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        match value {
            JsonValue::Null => {}
            JsonValue::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_to_string(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_to_string(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

fn scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Array(_) | JsonValue::Object(_) => Some(value.to_string()),
    }
}

fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let text = if name == AUTHORIZATION {
                "Bearer ***".to_string()
            } else {
                value.to_str().unwrap_or_default().to_string()
            };
            (name.as_str().to_string(), text)
        })
        .collect()
}
