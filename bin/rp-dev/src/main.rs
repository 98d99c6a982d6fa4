//! Rampart Development Tool
//!
//! Loads configuration, opens the configured document store, creates the
//! MongoDB indexes when needed and optionally seeds sample data, then prints
//! what the store holds.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use rp_common::LogFormat;
use rp_config::{AppConfig, ConfigLoader, StoreBackend};
use rp_platform::{initialize_indexes, DevDataSeeder, DocumentStore, MemoryStore, MongoStore, PlatformServices};

#[derive(Parser, Debug)]
#[command(name = "rp-dev")]
#[command(about = "Rampart development tool - prepares a store and seeds sample data")]
struct Args {
    /// Configuration file (otherwise RAMPART_CONFIG or the standard search paths)
    #[arg(long, env = "RAMPART_CONFIG")]
    config: Option<PathBuf>,

    /// Seed sample data even when dev_mode is off
    #[arg(long, default_value = "false")]
    seed: bool,

    /// Print an example configuration file and exit
    #[arg(long, default_value = "false")]
    example_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.example_config {
        println!("{}", AppConfig::example_toml());
        return Ok(());
    }

    let config = {
        let _startup = rp_common::startup_logging("rp-dev");
        let loader = match &args.config {
            Some(path) => ConfigLoader::with_path(path),
            None => ConfigLoader::new(),
        };
        loader.load().map_err(|e| {
            error!("Failed to load configuration: {}", e);
            e
        })?
    };

    let format: LogFormat = config.logging.format.parse().unwrap_or_default();
    rp_common::init_logging_with("rp-dev", format, &config.logging.level);

    info!("Starting Rampart dev tool");
    info!(backend = ?config.store.backend, dev_mode = config.dev_mode, "Configuration loaded");

    let store = open_store(&config).await?;
    let services = PlatformServices::new(store);

    if args.seed || config.dev_mode {
        DevDataSeeder::new(&services)
            .seed()
            .await
            .context("Failed to seed development data")?;
    }

    let applications = services.applications.list().await?;
    let identity_resources = services.identity_resources.list().await?;
    let api_resources = services.api_resources.list().await?;
    let modules = services.modules.list().await?;

    info!(
        applications = applications.len(),
        identity_resources = identity_resources.len(),
        api_resources = api_resources.len(),
        modules = modules.len(),
        "Store ready"
    );
    for app in &applications {
        info!("  application {} ({}) id={}", app.code, app.name, app.id);
    }

    Ok(())
}

async fn open_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Mongodb => {
            let store = MongoStore::connect(&config.mongodb.uri, &config.mongodb.database)
                .await
                .context("Failed to connect to MongoDB")?;
            initialize_indexes(store.database())
                .await
                .context("Failed to create MongoDB indexes")?;
            Ok(Arc::new(store))
        }
    }
}
