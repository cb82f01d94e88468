//! # HighLevel SDK
//!
//! A Rust client for the HighLevel (LeadConnector) CRM REST API, with
//! flattening of CRM entities into Arrow tables.
//!
//! ## Features
//!
//! - **OAuth2**: consent URL, code exchange, token refresh
//! - **Typed entities**: contacts, opportunities, pipelines, calendars and more,
//!   each bound to the session that fetched it
//! - **Lazy pagination**: cursors over the API's pagination styles
//! - **Arrow Output**: one RecordBatch per entity type, Parquet export
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use highlevel_sdk::{service::HighLevelService, session::Session, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let session = Session::with_token("access-token")?;
//!     let mut service = HighLevelService::new(session, "location-id");
//!
//!     let contacts = service.contacts_table().await;
//!     let attributions = service.attributions_table();
//!     println!("{} contacts, {} attributions", contacts.num_rows(), attributions.num_rows());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                HighLevelService (tables, accumulators)          │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │ Resources│  Request  │   Paginate    │  Extract  │   Output    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Location │ Edge/Node │ Meta          │ Rows      │ Arrow       │
//! │ Agency   │ Envelope  │ Conversations │ Attrib.   │ Parquet     │
//! │ Calendar │ Params    │ Messages      │ Custom    │             │
//! │ Contact  │           │ Submissions   │ fields    │             │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//!                                │
//!              Session (credentials + retrying HTTP client)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// Common types and type aliases
pub mod types;

/// SDK configuration
pub mod config;

/// HTTP client with retry
pub mod http;

/// OAuth2 and credentials
pub mod auth;

/// Authenticated session
pub mod session;

/// Request builder
pub mod request;

/// Pagination strategies and cursors
pub mod pagination;

/// Response parsing
pub mod parser;

/// Entity types
pub mod models;

/// Resource facade and entity-bound operations
pub mod resources;

/// Flattening of entities into rows
pub mod extract;

/// Arrow/Parquet output
pub mod output;

/// Table orchestration
pub mod service;

/// Date helpers
pub mod date;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use models::ApiObject;
pub use resources::LocationResource;
pub use service::{HighLevelApi, HighLevelService};
pub use session::Session;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
