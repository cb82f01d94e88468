//! OAuth client
//!
//! Builds the consent-screen URL and performs the authorization-code and
//! refresh-token exchanges against the token endpoint.

use super::types::Credentials;
use crate::config::SdkConfig;
use crate::error::{Error, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Path of the token endpoint, relative to the API base URL
const TOKEN_PATH: &str = "/oauth/token";

/// Path of the location chooser, relative to the auth base URL
const AUTHORIZE_PATH: &str = "/oauth/chooselocation";

/// OAuth client for the HighLevel marketplace application
#[derive(Debug, Clone)]
pub struct OAuthClient {
    /// SDK configuration (client id/secret, URLs, scopes)
    config: SdkConfig,
    /// HTTP client for token requests
    http_client: Client,
}

impl OAuthClient {
    /// Create a new OAuth client with the given config
    pub fn new(config: SdkConfig) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }

    /// Create an OAuth client with a custom HTTP client
    pub fn with_client(config: SdkConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Get the current config
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// URL of the consent screen the user is redirected to
    pub fn authorize_url(&self) -> Result<Url> {
        let client_id = self.config.require_client_id()?;
        let base = self.config.auth_base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{AUTHORIZE_PATH}"))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("client_id", client_id)
            .append_pair("scope", &self.config.scopes.join(" "));
        Ok(url)
    }

    /// Exchange an authorization code for a token bundle
    pub async fn exchange_code(&self, code: &str) -> Result<Credentials> {
        let client_id = self.config.require_client_id()?;
        let client_secret = self.config.require_client_secret()?;

        let form = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("user_type", "Location"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        self.token_request(&form, |message| Error::OAuth2 { message })
            .await
    }

    /// Exchange a refresh token for a new token bundle
    pub async fn refresh(&self, refresh_token: &str) -> Result<Credentials> {
        let client_id = self.config.require_client_id()?;
        let client_secret = self.config.require_client_secret()?;

        let form = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("user_type", "Location"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        self.token_request(&form, |message| Error::TokenRefresh { message })
            .await
    }

    /// POST a form to the token endpoint and parse the bundle
    async fn token_request(
        &self,
        form: &[(&str, &str)],
        on_failure: fn(String) -> Error,
    ) -> Result<Credentials> {
        let base = self.config.api_base_url.trim_end_matches('/');
        let url = format!("{base}{TOKEN_PATH}");

        let response = self
            .http_client
            .post(&url)
            .header("Accept", "application/json")
            .form(form)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(on_failure(format!(
                "Token request failed with status {status}: {body}"
            )));
        }

        let credentials: Credentials = response.json().await.map_err(Error::Http)?;
        debug!(
            "Token issued for user type {:?}",
            credentials.user_type.as_deref()
        );
        Ok(credentials)
    }
}
