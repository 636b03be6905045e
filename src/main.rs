//! foodroute
//!
//! Entry point for the foodroute CLI.

mod cli;
mod cmd_matrix;
mod cmd_ors;
mod cmd_places;
mod cmd_scrape;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use foodroute_config::{Config, ConfigLoader, ConfigValidator};
use foodroute_store::{JsonFileStore, KEY_AREA_PLACES};

use crate::cli::{Cli, Commands};

/// Get the foodroute home directory (~/.foodroute).
fn foodroute_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".foodroute"))
        .unwrap_or_else(|| PathBuf::from(".foodroute"))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.foodroute/logs/ with daily rotation.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = foodroute_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("foodroute")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Dropping the guard stops the writer thread.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Load and validate the configuration, falling back to defaults when the
/// file does not exist.
fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path)?;
    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    Ok(config)
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(ConfigLoader::expand_path(&path.to_string_lossy()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let store = JsonFileStore::new(expand(&config.storage.data_file));
    info!("Data file: {}", store.path().display());

    match cli.command {
        Some(Commands::Scrape { url }) => {
            cmd_scrape::scrape(&config, &store, url).await?;
        }
        Some(Commands::Resolve) => {
            cmd_places::resolve(&config, &store).await?;
        }
        Some(Commands::Filter) => {
            cmd_places::filter(&config, &store).await?;
        }
        Some(Commands::Matrix { source_key, output }) => {
            let output = output.unwrap_or_else(|| expand(&config.storage.matrix_csv));
            cmd_matrix::matrix(&config, &store, &source_key, &output).await?;
        }
        Some(Commands::Health) => cmd_ors::health(&config).await?,
        Some(Commands::Status) => cmd_ors::status(&config).await?,
        Some(Commands::Run { url }) => run_pipeline(&config, &store, url).await?,
        None => run_pipeline(&config, &store, None).await?,
    }

    Ok(())
}

/// Run every stage in order, each reading the previous stage's output from
/// the store.
async fn run_pipeline(
    config: &Config,
    store: &JsonFileStore,
    url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting foodroute v{}", env!("CARGO_PKG_VERSION"));

    cmd_scrape::scrape(config, store, url).await?;
    cmd_places::resolve(config, store).await?;
    cmd_places::filter(config, store).await?;
    cmd_matrix::matrix(config, store, KEY_AREA_PLACES, &expand(&config.storage.matrix_csv)).await?;

    info!("Pipeline complete");
    Ok(())
}
