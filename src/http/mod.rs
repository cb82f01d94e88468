//! HTTP transport module
//!
//! Provides the transport every API call goes through.
//!
//! # Features
//!
//! - **Bearer Authentication**: Every call is stamped with the session token
//! - **Automatic Retries**: Transport failures retried with exponential backoff
//! - **Typed Failures**: HTTP statuses >= 400 become `Error::Request`

mod client;

pub use client::{
    query_pairs, ApiResponse, CallContext, HighLevelClient, HttpClientConfig,
    HttpClientConfigBuilder,
};

#[cfg(test)]
mod tests;
