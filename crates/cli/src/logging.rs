use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use plexifier_core::config::{LogLevel, LoggingConfig};

/// File written inside `log_dir` when JSON logging is enabled.
pub const LOG_FILE_NAME: &str = "plexifier.log";

/// Installs the global subscriber: console output plus an optional JSON
/// lines file.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let json_layer = if config.json_file {
        let file = open_log_file(&config.log_dir).with_context(|| {
            format!("Failed to open log file in {}", config.log_dir.display())
        })?;
        Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(Mutex::new(file)),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter(config.level))
        .with(tracing_subscriber::fmt::layer())
        .with(json_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: LogLevel) -> String {
    format!(
        "{},hyper=warn,hyper_util=warn,reqwest=warn",
        level.as_filter()
    )
}

fn open_log_file(log_dir: &Path) -> std::io::Result<File> {
    std::fs::create_dir_all(log_dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE_NAME))
}
