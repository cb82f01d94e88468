//! CLI module
//!
//! Command-line interface for the OAuth flow and table extraction.
//!
//! # Commands
//!
//! - `auth-url` - Print the consent URL
//! - `exchange` / `refresh` - Obtain tokens
//! - `serve` - Start the OAuth callback server
//! - `fetch` - Print one table
//! - `export` - Write every table as Parquet

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
pub use server::{router, serve, ServerConfig};
