//! Inventory Loader
//!
//! Loads rack groups, racks and devices from Nautobot and prints how many
//! objects of each kind were found. A failing collection is reported and the
//! remaining ones are still loaded.
//!
//! Settings may also come from a `.env` file in the working directory (or a
//! parent); variables already set in the environment take precedence.

mod error;
mod loader;

use crate::error::LoaderError;
use clap::Parser;
use loader::ResourceKind;
use nautobot_client::config::{BASE_URL_ENV, TOKEN_ENV};
use nautobot_client::{NautobotClient, NautobotConfig};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line options; unset values fall back to the environment
#[derive(Debug, Parser)]
#[command(name = "inventory-loader", version, about)]
struct Args {
    /// Nautobot API base URL (falls back to NAUTOBOT_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// API token (falls back to NAUTOBOT_API_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Accept invalid TLS certificates (also NAUTOBOT_ACCEPT_INVALID_CERTS=1)
    #[arg(long)]
    insecure: bool,

    /// Collections to load; defaults to rack groups, racks and devices
    #[arg(long = "resource", value_enum)]
    resources: Vec<ResourceKind>,
}

impl Args {
    fn config(&self) -> NautobotConfig {
        let config = NautobotConfig::from_lookup(|key| match key {
            BASE_URL_ENV => self.base_url.clone().or_else(|| env::var(key).ok()),
            TOKEN_ENV => self.token.clone().or_else(|| env::var(key).ok()),
            _ => env::var(key).ok(),
        });
        let insecure = config.accept_invalid_certs || self.insecure;
        config.with_accept_invalid_certs(insecure)
    }

    fn resources(&self) -> &[ResourceKind] {
        if self.resources.is_empty() {
            &ResourceKind::DEFAULT
        } else {
            &self.resources
        }
    }
}

/// Load `.env` into the process environment without overriding variables
/// that are already set.
fn load_dotenv() {
    report_dotenv(dotenvy::dotenv());
}

fn report_dotenv(result: Result<PathBuf, dotenvy::Error>) -> Option<PathBuf> {
    match result {
        Ok(path) => {
            debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => {
            debug!("No .env file found, using the process environment");
            None
        }
        Err(e) => {
            warn!("Ignoring unreadable .env file: {}", e);
            None
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), LoaderError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let args = Args::parse();
    let config = args.config();

    info!("Starting Inventory Loader");
    info!("  Nautobot URL: {}", config.base_url);

    let client = NautobotClient::new(&config)?;
    let reports = loader::load_all(&client, args.resources()).await;
    loader::write_report(&reports, &mut std::io::stdout().lock())?;

    Ok(())
}
