//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HighLevel CRM extraction CLI
#[derive(Parser, Debug)]
#[command(name = "highlevel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Access token for API calls
    #[arg(long, global = true, env = "GHL_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Location (tenant) id
    #[arg(short, long, global = true, env = "GHL_LOCATION_ID")]
    pub location: Option<String>,

    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the OAuth consent URL
    AuthUrl,

    /// Exchange an authorization code for tokens
    Exchange {
        /// Code received on the redirect URI
        #[arg(long)]
        code: String,
    },

    /// Refresh an access token
    Refresh {
        #[arg(long)]
        refresh_token: String,
    },

    /// Serve the OAuth flow over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Build one table and print it
    Fetch {
        /// Table name (users, calendar_events, custom_fields, custom_values,
        /// pipelines, contacts, opportunities, attributions, custom_field_values)
        entity: String,

        /// First day of the calendar window (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Write every table as Parquet
    Export {
        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// First day of the calendar window (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
