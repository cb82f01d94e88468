//! CLI runner - executes commands

use crate::auth::{Credentials, OAuthClient};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::cli::server::{serve, ServerConfig};
use crate::config::SdkConfig;
use crate::error::{Error, Result, ResultExt};
use crate::output::{table_to_json, write_table_to_parquet};
use crate::service::{HighLevelService, TABLES};
use crate::session::Session;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::AuthUrl => {
                let url = self.oauth()?.authorize_url()?;
                println!("{url}");
                Ok(())
            }
            Commands::Exchange { code } => {
                let credentials = self.oauth()?.exchange_code(code).await?;
                self.print(&credentials)
            }
            Commands::Refresh { refresh_token } => {
                let credentials = self.oauth()?.refresh(refresh_token).await?;
                self.print(&credentials)
            }
            Commands::Serve { port } => {
                let config = ServerConfig {
                    oauth: self.oauth()?,
                };
                serve(config, *port).await
            }
            Commands::Fetch { entity, date } => {
                self.fetch(entity, &resolve_date(date.as_deref())).await
            }
            Commands::Export { output, date } => {
                self.export(output, &resolve_date(date.as_deref())).await
            }
        }
    }

    /// SDK configuration from `--config`, then the environment
    fn load_config(&self) -> Result<SdkConfig> {
        match &self.cli.config {
            Some(path) => {
                let _ = dotenvy::dotenv();
                Ok(SdkConfig::from_yaml_file(path)?
                    .with_env_overrides(|key| std::env::var(key).ok()))
            }
            None => Ok(SdkConfig::from_env()),
        }
    }

    fn oauth(&self) -> Result<OAuthClient> {
        Ok(OAuthClient::new(self.load_config()?))
    }

    fn service(&self) -> Result<HighLevelService> {
        let token = self
            .cli
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::missing_field("token (use --token or GHL_ACCESS_TOKEN)"))?;
        let location = self
            .cli
            .location
            .as_deref()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| {
                Error::missing_field("location (use --location or GHL_LOCATION_ID)")
            })?;

        let credentials = Credentials::new(token).with_location_id(location);
        let session = Session::from_config(&self.load_config()?, credentials)?;
        Ok(HighLevelService::new(session, location))
    }

    /// Build one table and print its rows
    async fn fetch(&self, entity: &str, date: &str) -> Result<()> {
        let mut service = self.service()?;
        let batch = service.table(entity, date).await.ok_or_else(|| {
            Error::invalid_argument(format!(
                "Unknown table '{entity}', expected one of: {}",
                TABLES.join(", ")
            ))
        })?;

        let records = table_to_json(&batch)?;
        match self.cli.format {
            OutputFormat::Json => {
                for record in &records {
                    println!("{}", serde_json::to_string(record)?);
                }
            }
            OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(&records)?),
        }
        Ok(())
    }

    /// Build every table and write `<output>/<table>.parquet`
    async fn export(&self, output: &Path, date: &str) -> Result<()> {
        let mut service = self.service()?;
        fs::create_dir_all(output).with_context(|| {
            format!("Failed to create output directory {}", output.display())
        })?;

        let start = Instant::now();
        let mut written = 0usize;
        for name in TABLES {
            let Some(batch) = service.table(name, date).await else {
                continue;
            };
            if batch.num_columns() == 0 {
                warn!(table = name, "Table is empty, skipping");
                continue;
            }

            let path = output.join(format!("{name}.parquet"));
            let rows = write_table_to_parquet(&path, &batch)
                .with_context(|| format!("Failed to export table {name}"))?;
            info!(table = name, rows, path = %path.display(), "Wrote table");
            written += 1;
        }

        info!(
            tables = written,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Export finished"
        );
        Ok(())
    }

    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}

/// Given date, or today (UTC)
fn resolve_date(date: Option<&str>) -> String {
    date.map_or_else(
        || chrono::Utc::now().format("%Y-%m-%d").to_string(),
        str::to_string,
    )
}
