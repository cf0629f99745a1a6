//! Ingestion loop
//!
//! Binds the watcher, the planner, and the scheduler into the daemon's
//! single control loop: consume events one at a time, mirror directory
//! creations, fan out a task set per created file, and log every terminal
//! task. Task sets for different files may be in flight at once; shutdown
//! stops event consumption, lets in-flight sets finish, then releases the
//! watcher.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use eyre::{Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::domain::{Task, TaskStatus};
use crate::planner::plan;
use crate::scheduler::Scheduler;
use crate::watcher::{DirectoryWatcher, FsEvent, FsEventKind};

/// Daemon wiring
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Root to watch for new files
    pub source_dir: PathBuf,
    /// Root of the mirrored destination tree
    pub dest_dir: PathBuf,
    /// Recurse into subdirectories of the source root
    pub recursive: bool,
}

/// The ingestion daemon
pub struct Daemon {
    config: DaemonConfig,
    scheduler: Arc<Scheduler>,
}

impl Daemon {
    /// Create the daemon over an already-validated configuration
    pub fn new(config: DaemonConfig, scheduler: Arc<Scheduler>) -> Self {
        Self { config, scheduler }
    }

    /// Run until the shutdown channel fires or the watch stream ends.
    ///
    /// Fatal only if the watcher cannot attach to the source root; every
    /// per-task failure stays on the task.
    pub async fn run(self, mut shutdown: mpsc::Receiver<()>) -> Result<()> {
        let mut watcher = DirectoryWatcher::open(&self.config.source_dir, self.config.recursive)
            .context("failed to watch source directory")?;

        info!(
            source = %self.config.source_dir.display(),
            dest = %self.config.dest_dir.display(),
            "moving files from source to destination, preserving directory structure"
        );

        let mut in_flight: JoinSet<()> = JoinSet::new();

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("shutdown requested, finishing in-flight deliveries");
                    break;
                }
                event = watcher.next_event() => match event {
                    Some(event) => self.handle_event(event, &mut in_flight),
                    None => {
                        warn!("watch stream ended");
                        break;
                    }
                },
                Some(result) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = result {
                        error!(error = %e, "delivery set aborted");
                    }
                }
            }
        }

        // In-flight task sets run to completion; no mid-upload aborts
        while let Some(result) = in_flight.join_next().await {
            if let Err(e) = result {
                error!(error = %e, "delivery set aborted");
            }
        }

        drop(watcher);
        info!("ingestion loop stopped");
        Ok(())
    }

    fn handle_event(&self, event: FsEvent, in_flight: &mut JoinSet<()>) {
        info!(event = %event, "filesystem event");

        match event.kind {
            FsEventKind::Initialized | FsEventKind::Modified | FsEventKind::Deleted => {
                debug!(kind = %event.kind, "ignoring event");
            }
            FsEventKind::Created if event.is_directory => {
                match mirror_directory(&event.path, &self.config.source_dir, &self.config.dest_dir)
                {
                    Ok(dest) => info!(dest = %dest.display(), "created mirrored directory"),
                    Err(e) => {
                        error!(path = %event.path.display(), error = %e, "failed to mirror directory");
                    }
                }
            }
            FsEventKind::Created => {
                let tasks = plan(&event.path, &self.config.source_dir, &self.config.dest_dir);
                debug!(source = %event.path.display(), count = tasks.len(), "planned task set");

                let scheduler = Arc::clone(&self.scheduler);
                in_flight.spawn(async move {
                    let finished = scheduler.execute(tasks).await;
                    log_outcome(&finished);
                });
            }
        }
    }
}

/// Log every terminal task of a finished set
fn log_outcome(tasks: &[Task]) {
    for task in tasks {
        match task.status {
            TaskStatus::Completed => {
                info!(kind = task.kind.label(), detail = %task.detail, "task completed");
            }
            TaskStatus::Failed => {
                error!(kind = task.kind.label(), detail = %task.detail, "task failed");
            }
            TaskStatus::Pending => {
                warn!(kind = task.kind.label(), "task left pending by scheduler");
            }
        }
    }
}

/// Recreate a source directory under the destination root.
///
/// Idempotent: an already-existing mirrored directory is not an error.
fn mirror_directory(path: &Path, source_root: &Path, dest_root: &Path) -> std::io::Result<PathBuf> {
    let relative = path
        .strip_prefix(source_root)
        .or_else(|_| path.strip_prefix(std::path::MAIN_SEPARATOR_STR))
        .unwrap_or(path);
    let dest = dest_root.join(relative);
    std::fs::create_dir_all(&dest)?;
    Ok(dest)
}
