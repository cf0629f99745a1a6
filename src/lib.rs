//! photoferry - photo drop directory mover
//!
//! Watches a source directory tree and, for each newly created file, fans
//! out a set of independent delivery tasks - a copy into a mirrored
//! destination tree and an upload to each configured photo service - then
//! removes the original once every delivery has succeeded. Directory
//! creations are mirrored under the destination root.
//!
//! # Core invariant
//!
//! The delete task for a file runs only after its copy and both uploads have
//! reached a terminal state, and never runs if any of them failed: a failed
//! delivery means the source is still the only complete copy, so the file
//! stays put for manual re-processing.
//!
//! # Modules
//!
//! - [`domain`] - the Task entity and its status model
//! - [`planner`] - pure construction of a file's task set
//! - [`uploader`] - the photo service seam and its clients
//! - [`runner`] - single-task execution with failure capture
//! - [`scheduler`] - concurrent fan-out with the gated delete
//! - [`watcher`] - recursive directory watch as an event stream
//! - [`daemon`] - the ingestion loop binding it all together
//! - [`config`] / [`cli`] - startup surface

pub mod cli;
pub mod config;
pub mod daemon;
pub mod domain;
pub mod planner;
pub mod runner;
pub mod scheduler;
pub mod uploader;
pub mod watcher;

// Re-export commonly used types
pub use cli::Cli;
pub use config::{Config, LoggingConfig, WatchConfig};
pub use daemon::{Daemon, DaemonConfig};
pub use domain::{Task, TaskKind, TaskStatus};
pub use planner::plan;
pub use runner::TaskRunner;
pub use scheduler::Scheduler;
pub use uploader::{GooglePhotosUploader, PhotoPrismUploader, UploadError, Uploader};
pub use watcher::{DirectoryWatcher, FsEvent, FsEventKind, WatchError};
