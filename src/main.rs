//! stracked - website interaction heatmaps
//!
//! Main entry point for the stracked CLI.

mod cli;
mod cmd_capture;
mod cmd_heatmap;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use stracked_config::{Config, ConfigError, ConfigLoader, ConfigValidator, LoggingConfig};
use stracked_store_sqlite::SqliteDocumentStore;

use crate::cli::{Cli, Commands};

/// Load the config file, falling back to the per-user config and then to
/// built-in defaults.
fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        return ConfigLoader::load(path);
    }

    let user_config = dirs::config_dir().map(|d| d.join("stracked").join("config.toml"));
    match user_config {
        Some(p) => ConfigLoader::load_or_default(&p),
        None => Ok(Config::default()),
    }
}

/// Initialize tracing with console and file output.
///
/// Log files are rotated daily under `logging.directory`.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = PathBuf::from(ConfigLoader::expand_path(&logging.directory));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("stracked")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the background writer alive for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Ok(())
}

/// Open the configured SQLite store, creating its directory.
pub(crate) async fn open_store(
    config: &Config,
) -> Result<Arc<SqliteDocumentStore>, Box<dyn std::error::Error>> {
    let path = PathBuf::from(ConfigLoader::expand_path(&config.storage.database_path));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    debug!("Opening store at {}", path.display());
    Ok(Arc::new(SqliteDocumentStore::open(&path).await?))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_tracing(&config.logging)?;

    for warning in ConfigValidator::validate(&config).into_result()? {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    match cli.command {
        Commands::Capture { site, urls } => cmd_capture::handle_capture(&config, site, urls).await,
        Commands::Aggregate { site, events } => {
            cmd_heatmap::handle_aggregate(&config, &site, events).await
        }
        Commands::Show { site, json } => cmd_heatmap::handle_show(&config, &site, json).await,
        Commands::ExportImage { site, output } => {
            cmd_heatmap::handle_export_image(&config, &site, output).await
        }
    }
}
