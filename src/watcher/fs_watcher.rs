//! Recursive directory watcher backed by the notify crate

use std::path::{Path, PathBuf};

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error};

use super::event::{FsEvent, FsEventKind};

/// Errors attaching the watcher to a root
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("watch root does not exist or is not a directory: {0}")]
    RootMissing(PathBuf),

    #[error("failed to create filesystem watcher: {0}")]
    Backend(#[from] notify::Error),
}

/// A live watch over a directory tree.
///
/// Produces an unbounded sequence of [`FsEvent`]s, starting with a single
/// `Initialized` event for the root. The OS watch handle lives exactly as
/// long as this struct: dropping it on any exit path releases the handle.
pub struct DirectoryWatcher {
    // Held only for its Drop; the backend pushes into the channel
    _backend: RecommendedWatcher,
    events: mpsc::UnboundedReceiver<FsEvent>,
}

impl DirectoryWatcher {
    /// Attach to `root` and start streaming events.
    ///
    /// Fails with [`WatchError::RootMissing`] if the root is not an existing
    /// directory and [`WatchError::Backend`] if the OS facility cannot be
    /// created.
    pub fn open(root: &Path, recursive: bool) -> Result<Self, WatchError> {
        if !root.is_dir() {
            return Err(WatchError::RootMissing(root.to_path_buf()));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(FsEvent {
            path: root.to_path_buf(),
            kind: FsEventKind::Initialized,
            is_directory: true,
        });

        let mut backend =
            notify::recommended_watcher(move |result: Result<notify::Event, notify::Error>| {
                match result {
                    Ok(event) => {
                        for fs_event in classify(event) {
                            // Receiver dropped means the daemon is shutting down
                            let _ = tx.send(fs_event);
                        }
                    }
                    Err(e) => error!(error = %e, "watch backend error"),
                }
            })?;

        let mode = if recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        backend.watch(root, mode)?;
        debug!(root = %root.display(), recursive, "watching directory");

        Ok(Self {
            _backend: backend,
            events: rx,
        })
    }

    /// Wait for the next event; `None` once the backend channel closes.
    pub async fn next_event(&mut self) -> Option<FsEvent> {
        self.events.recv().await
    }
}

/// Map a raw backend notification onto our event vocabulary.
///
/// Access/metadata notifications are dropped; a single notification can
/// carry several paths and fans out to one event per path.
fn classify(event: notify::Event) -> Vec<FsEvent> {
    let kind = match event.kind {
        EventKind::Create(_) => FsEventKind::Created,
        EventKind::Modify(_) => FsEventKind::Modified,
        EventKind::Remove(_) => FsEventKind::Deleted,
        _ => return Vec::new(),
    };

    event
        .paths
        .into_iter()
        .map(|path| {
            let is_directory = path.is_dir();
            FsEvent {
                path,
                kind,
                is_directory,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;

    async fn next_with_timeout(watcher: &mut DirectoryWatcher) -> Option<FsEvent> {
        tokio::time::timeout(Duration::from_secs(5), watcher.next_event())
            .await
            .expect("timed out waiting for event")
    }

    /// Drain events until one matches, tolerating backend noise (modify
    /// events for the same path, ordering differences between platforms).
    async fn wait_for(
        watcher: &mut DirectoryWatcher,
        predicate: impl Fn(&FsEvent) -> bool,
    ) -> FsEvent {
        loop {
            let event = next_with_timeout(watcher).await.expect("stream ended");
            if predicate(&event) {
                return event;
            }
        }
    }

    #[tokio::test]
    async fn test_open_missing_root_fails() {
        let result = DirectoryWatcher::open(Path::new("/nonexistent/photoferry-test"), true);
        assert!(matches!(result, Err(WatchError::RootMissing(_))));
    }

    #[tokio::test]
    async fn test_stream_starts_with_initialized() {
        let dir = TempDir::new().expect("tempdir");
        let mut watcher = DirectoryWatcher::open(dir.path(), true).expect("open watcher");

        let first = next_with_timeout(&mut watcher).await.expect("first event");
        assert_eq!(first.kind, FsEventKind::Initialized);
        assert!(first.is_directory);
    }

    #[tokio::test]
    async fn test_created_file_is_observed() {
        let dir = TempDir::new().expect("tempdir");
        let mut watcher = DirectoryWatcher::open(dir.path(), true).expect("open watcher");

        // Let the backend settle before generating the event
        tokio::time::sleep(Duration::from_millis(200)).await;
        let file = dir.path().join("a.jpg");
        std::fs::write(&file, b"pixels").expect("write file");

        let event = wait_for(&mut watcher, |e| {
            e.kind == FsEventKind::Created && e.path == file
        })
        .await;
        assert!(!event.is_directory);
    }

    #[tokio::test]
    async fn test_created_directory_is_flagged() {
        let dir = TempDir::new().expect("tempdir");
        let mut watcher = DirectoryWatcher::open(dir.path(), true).expect("open watcher");

        tokio::time::sleep(Duration::from_millis(200)).await;
        let subdir = dir.path().join("2024");
        std::fs::create_dir(&subdir).expect("mkdir");

        let event = wait_for(&mut watcher, |e| {
            e.kind == FsEventKind::Created && e.path == subdir
        })
        .await;
        assert!(event.is_directory);
    }
}
