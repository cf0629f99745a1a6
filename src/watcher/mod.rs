//! Directory watcher module
//!
//! Watches the source root recursively and exposes filesystem changes as a
//! lazy, unbounded stream of classified events. The underlying OS watch
//! handle is released when the watcher is dropped, on every exit path.

mod event;
mod fs_watcher;

pub use event::{FsEvent, FsEventKind};
pub use fs_watcher::{DirectoryWatcher, WatchError};
