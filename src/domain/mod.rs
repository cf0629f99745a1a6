//! Domain types for photoferry
//!
//! Core domain type: Task, one delivery obligation for one source file.
//! A task set (copy, two uploads, delete) is created per ingested file and
//! lives only for the scheduler invocation that executes it.

mod task;

pub use task::{Task, TaskKind, TaskStatus};
