mod cli;
mod logging;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};

use plexifier_core::{
    load_config, setup_directories, validate_config, ExternalCatalog, FsPlacer, MediaRenamer,
    RunSummary, SanitizedConfig, TmdbClient,
};

use cli::Cli;

/// Exit status when a shutdown signal stopped the run early.
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(summary) if summary.cancelled => ExitCode::from(EXIT_CANCELLED),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunSummary> {
    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);

    logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    validate_config(&config).context("Configuration validation failed")?;

    let sanitized = serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default();
    info!(config = %sanitized, "Configuration loaded");

    let catalog: Arc<dyn ExternalCatalog> = Arc::new(
        TmdbClient::new(config.tmdb.clone()).context("Failed to initialize TMDB client")?,
    );

    if config.renamer.dry_run {
        info!("DRY RUN MODE - no files will be moved");
    } else {
        setup_directories(&config.library)
            .await
            .context("Failed to create media directories")?;
    }

    let source_dir = cli.source_dir(&config);
    let renamer = MediaRenamer::new(config, catalog, FsPlacer::with_defaults());

    let cancel = renamer.cancellation();
    tokio::spawn(async move {
        shutdown_signal().await;
        warn!("Shutdown signal received, finishing current file");
        cancel.cancel();
    });

    Ok(renamer.run(&source_dir).await)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
