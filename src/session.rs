//! Authenticated session
//!
//! A `Session` pairs a token bundle with a shared transport handle. Every
//! call made through a session is stamped with its bearer token, and every
//! entity parsed from a response keeps a clone of the session that fetched it.

use crate::auth::{Credentials, OAuthClient};
use crate::config::SdkConfig;
use crate::error::{Error, Result};
use crate::http::{ApiResponse, HighLevelClient, HttpClientConfig};
use crate::types::{JsonObject, Method};
use std::sync::Arc;
use tracing::info;

/// Credentials plus transport, cheap to clone
#[derive(Clone)]
pub struct Session {
    client: Arc<HighLevelClient>,
    credentials: Arc<Credentials>,
}

impl Session {
    /// Create a session over an existing transport
    pub fn new(client: HighLevelClient, credentials: Credentials) -> Self {
        Self {
            client: Arc::new(client),
            credentials: Arc::new(credentials),
        }
    }

    /// Create a session whose transport is built from SDK configuration
    pub fn from_config(config: &SdkConfig, credentials: Credentials) -> Result<Self> {
        let client = HighLevelClient::with_config(HttpClientConfig::from(config))?;
        Ok(Self::new(client, credentials))
    }

    /// Session for a bare access token with default settings
    pub fn with_token(access_token: impl Into<String>) -> Result<Self> {
        Ok(Self::new(
            HighLevelClient::new()?,
            Credentials::new(access_token),
        ))
    }

    /// A session sharing this transport but holding other credentials
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        Self {
            client: Arc::clone(&self.client),
            credentials: Arc::new(credentials),
        }
    }

    /// Token bundle of this session
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Shared transport
    pub fn client(&self) -> &HighLevelClient {
        &self.client
    }

    /// Issue one call with this session's token
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        params: &JsonObject,
    ) -> Result<ApiResponse> {
        self.client
            .call(method, path, &self.credentials, params)
            .await
    }

    /// Exchange the refresh token for a new session
    pub async fn refresh(&self, oauth: &OAuthClient) -> Result<Session> {
        let refresh_token = self
            .credentials
            .refresh_token
            .as_deref()
            .ok_or_else(|| Error::TokenRefresh {
                message: "Session has no refresh token".to_string(),
            })?;

        let credentials = oauth.refresh(refresh_token).await?;
        info!("Session token refreshed");
        Ok(self.with_credentials(credentials))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.credentials)
            .field("base_url", &self.client.config().base_url)
            .finish()
    }
}
