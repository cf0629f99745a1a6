//! Task domain type
//!
//! A Task describes one delivery obligation for one source file. The kind
//! carries the kind-specific payload; whether a task is destructive (may
//! remove its source) is a predicate on the kind, not a separate type.

use std::path::{Path, PathBuf};

/// Task status
///
/// `Completed` and `Failed` are terminal; a task's status never changes
/// again once it leaves `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    /// Not yet executed
    #[default]
    Pending,
    /// Executed successfully
    Completed,
    /// Executed and failed; the detail records why
    Failed,
}

impl TaskStatus {
    /// Check whether the status is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// What a task does to its source file, with the kind-specific payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    /// Copy the source into the mirrored destination tree
    Copy {
        /// Destination path, never overwritten if it already exists
        dest: PathBuf,
    },
    /// Upload the source to a Google Photos album
    UploadGooglePhotos { album: String },
    /// Upload the source to a PhotoPrism album
    UploadPhotoPrism { album: String },
    /// Remove the source file
    Delete,
}

impl TaskKind {
    /// Whether this task removes or mutates its source file.
    ///
    /// Destructive tasks must never run before every non-destructive task
    /// for the same source has completed; the scheduler enforces this.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete)
    }

    /// Short name used in log lines and failure details
    pub fn label(&self) -> &'static str {
        match self {
            Self::Copy { .. } => "copy",
            Self::UploadGooglePhotos { .. } => "google-photos upload",
            Self::UploadPhotoPrism { .. } => "photoprism upload",
            Self::Delete => "delete",
        }
    }
}

/// One delivery obligation for one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Absolute path of the file being acted upon
    pub source: PathBuf,
    /// What to do with it
    pub kind: TaskKind,
    /// Current status; terminal once non-pending
    pub status: TaskStatus,
    /// Human-readable outcome, empty while pending
    pub detail: String,
}

impl Task {
    /// Create a pending task
    pub fn new(source: impl Into<PathBuf>, kind: TaskKind) -> Self {
        Self {
            source: source.into(),
            kind,
            status: TaskStatus::Pending,
            detail: String::new(),
        }
    }

    /// Finish the task successfully
    pub fn complete(mut self, detail: impl Into<String>) -> Self {
        self.status = TaskStatus::Completed;
        self.detail = detail.into();
        self
    }

    /// Finish the task as failed
    pub fn fail(mut self, detail: impl Into<String>) -> Self {
        self.status = TaskStatus::Failed;
        self.detail = detail.into();
        self
    }

    /// Check whether the task has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The source path as a `Path`
    pub fn source(&self) -> &Path {
        &self.source
    }
}
