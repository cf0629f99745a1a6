//! Filesystem event type

use std::path::PathBuf;

/// What happened to a path under the watched root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEventKind {
    /// Emitted once when the watch stream opens
    Initialized,
    Created,
    Modified,
    Deleted,
}

impl std::fmt::Display for FsEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized => write!(f, "initialized"),
            Self::Created => write!(f, "created"),
            Self::Modified => write!(f, "modified"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// A single filesystem observation.
///
/// Events are transient: they are consumed by the ingestion loop and never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEvent {
    pub path: PathBuf,
    pub kind: FsEventKind,
    /// Whether the path is a directory, probed when the event is classified.
    /// A deleted path can no longer be probed and reports false.
    pub is_directory: bool,
}

impl std::fmt::Display for FsEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}{}",
            self.kind,
            self.path.display(),
            if self.is_directory { " (directory)" } else { "" }
        )
    }
}
