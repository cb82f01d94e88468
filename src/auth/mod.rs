//! Authentication module
//!
//! Supports: OAuth2 authorization code, OAuth2 refresh token
//!
//! `Credentials` is the token bundle every session carries; `OAuthClient`
//! obtains and refreshes it.

mod oauth;
mod types;

pub use oauth::OAuthClient;
pub use types::Credentials;
