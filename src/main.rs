//! photoferry - photo drop directory mover
//!
//! CLI entry point: validates the two directory roots, wires the runner,
//! scheduler, and daemon together, and runs the ingestion loop until a
//! shutdown signal arrives.

use std::fs;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result, eyre};
use tracing::{info, warn};

use photoferry::cli::Cli;
use photoferry::config::Config;
use photoferry::daemon::{Daemon, DaemonConfig};
use photoferry::runner::TaskRunner;
use photoferry::scheduler::Scheduler;
use photoferry::uploader::{GooglePhotosUploader, PhotoPrismUploader, Uploader};

fn setup_logging(level: &str) -> Result<()> {
    let level: tracing::Level = level
        .parse()
        .map_err(|_| eyre!("unknown log level: {level}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.log_level);
    setup_logging(level).context("Failed to setup logging")?;

    // Fail fast on the directory roots, reporting every problem at once
    let mut problems = Vec::new();
    if !cli.source.is_dir() {
        problems.push(format!("source directory does not exist: {}", cli.source.display()));
    }
    if !cli.dest.is_dir() {
        problems.push(format!("destination directory does not exist: {}", cli.dest.display()));
    }
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("{problem}");
        }
        std::process::exit(1);
    }

    // Watch events carry canonical paths; canonicalize the roots so relative
    // paths strip cleanly
    let source_dir = fs::canonicalize(&cli.source).context("Failed to resolve source directory")?;
    let dest_dir = fs::canonicalize(&cli.dest).context("Failed to resolve destination directory")?;

    let google: Arc<dyn Uploader> = Arc::new(GooglePhotosUploader::new());
    let photoprism: Arc<dyn Uploader> = Arc::new(PhotoPrismUploader::new());
    let runner = Arc::new(TaskRunner::new(google, photoprism));
    let scheduler = Arc::new(Scheduler::new(runner));

    let daemon = Daemon::new(
        DaemonConfig {
            source_dir,
            dest_dir,
            recursive: config.watch.recursive,
        },
        scheduler,
    );

    // Signal handling: first signal requests a graceful stop
    let (shutdown_tx, shutdown_rx) = tokio::sync::mpsc::channel::<()>(1);
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            let mut sigint = match signal(SignalKind::interrupt()) {
                Ok(s) => s,
                Err(e) => {
                    warn!(error = %e, "failed to install SIGINT handler");
                    return;
                }
            };
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler");
                    return;
                }
            };

            tokio::select! {
                _ = sigint.recv() => warn!("SIGINT received"),
                _ = sigterm.recv() => warn!("SIGTERM received"),
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to wait for Ctrl+C");
                return;
            }
            warn!("Ctrl+C received");
        }

        let _ = shutdown_tx.send(()).await;
    });

    info!("photoferry starting");
    daemon.run(shutdown_rx).await
}
