//! Task execution
//!
//! The runner executes a single task against its target and hands it back in
//! a terminal state. It never returns an error: every copy, upload, or delete
//! failure is captured as `TaskStatus::Failed` with the underlying message in
//! the task's detail. Ordering between tasks is not the runner's concern;
//! the scheduler decides when a delete may run.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use tokio::fs;
use tracing::debug;

use crate::domain::{Task, TaskKind};
use crate::uploader::Uploader;

/// Executes one task at a time against the filesystem and the photo services
pub struct TaskRunner {
    google: Arc<dyn Uploader>,
    photoprism: Arc<dyn Uploader>,
}

impl TaskRunner {
    /// Create a runner backed by the given upload clients
    pub fn new(google: Arc<dyn Uploader>, photoprism: Arc<dyn Uploader>) -> Self {
        Self { google, photoprism }
    }

    /// Run one task to a terminal state.
    ///
    /// Re-running against an already-absent source or already-present
    /// destination fails cleanly rather than corrupting state; no retries
    /// are attempted here.
    pub async fn run(&self, task: Task) -> Task {
        debug!(kind = task.kind.label(), source = %task.source.display(), "running task");
        match task.kind.clone() {
            TaskKind::Copy { dest } => self.run_copy(task, &dest).await,
            TaskKind::UploadGooglePhotos { album } => {
                self.run_upload(task, Arc::clone(&self.google), &album).await
            }
            TaskKind::UploadPhotoPrism { album } => {
                self.run_upload(task, Arc::clone(&self.photoprism), &album).await
            }
            TaskKind::Delete => self.run_delete(task).await,
        }
    }

    async fn run_copy(&self, task: Task, dest: &Path) -> Task {
        match copy_no_overwrite(&task.source, dest).await {
            Ok(bytes) => {
                let detail = format!(
                    "copied {} to {} ({} bytes)",
                    task.source.display(),
                    dest.display(),
                    bytes
                );
                task.complete(detail)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let detail = format!(
                    "destination {} already exists, refusing to overwrite",
                    dest.display()
                );
                task.fail(detail)
            }
            Err(e) => {
                let detail = format!(
                    "failed to copy {} to {}: {}",
                    task.source.display(),
                    dest.display(),
                    e
                );
                task.fail(detail)
            }
        }
    }

    async fn run_upload(&self, task: Task, uploader: Arc<dyn Uploader>, album: &str) -> Task {
        match uploader.upload(&task.source, album).await {
            Ok(()) => {
                let detail = format!(
                    "uploaded {} to {} album '{}'",
                    task.source.display(),
                    uploader.service(),
                    album
                );
                task.complete(detail)
            }
            Err(e) => {
                let detail = format!(
                    "failed to upload {} to {} album '{}': {}",
                    task.source.display(),
                    uploader.service(),
                    album,
                    e
                );
                task.fail(detail)
            }
        }
    }

    async fn run_delete(&self, task: Task) -> Task {
        match fs::remove_file(&task.source).await {
            Ok(()) => {
                let detail = format!("deleted {}", task.source.display());
                task.complete(detail)
            }
            Err(e) => {
                let detail = format!("failed to delete {}: {}", task.source.display(), e);
                task.fail(detail)
            }
        }
    }
}

/// Copy `source` to `dest`, refusing to clobber an existing destination.
///
/// `create_new` makes the existence check and the create one atomic
/// operation, so two racing copies cannot both win.
async fn copy_no_overwrite(source: &Path, dest: &Path) -> std::io::Result<u64> {
    let mut from = fs::File::open(source).await?;
    let mut to = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .await?;
    tokio::io::copy(&mut from, &mut to).await
}
