//! Scheduler module
//!
//! Orchestrates one file's task set: the non-destructive deliveries run
//! concurrently, and the delete only runs once all of them have completed.

mod core;

pub use core::Scheduler;
