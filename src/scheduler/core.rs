//! Scheduler implementation

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{Task, TaskStatus};
use crate::runner::TaskRunner;

/// Runs one file's task set to completion.
///
/// Invariant enforced here: a destructive task never runs until every
/// non-destructive task for the same source file has reached a terminal
/// state, and never runs at all if any of them failed: a failed delivery
/// means the source is still the only complete copy.
pub struct Scheduler {
    runner: Arc<TaskRunner>,
}

impl Scheduler {
    /// Create a scheduler over the given runner
    pub fn new(runner: Arc<TaskRunner>) -> Self {
        Self { runner }
    }

    /// Execute a planned task set and return every task in a terminal state,
    /// in planned order.
    ///
    /// The non-destructive tasks are all attempted even if some fail, so the
    /// caller gets a complete status report per file.
    pub async fn execute(&self, tasks: Vec<Task>) -> Vec<Task> {
        let (deliveries, removals): (Vec<Task>, Vec<Task>) =
            tasks.into_iter().partition(|t| !t.kind.is_destructive());

        debug!(
            deliveries = deliveries.len(),
            removals = removals.len(),
            "executing task set"
        );

        let handles: Vec<_> = deliveries
            .into_iter()
            .map(|task| {
                let runner = Arc::clone(&self.runner);
                // Keep a copy so a panicked worker still yields a terminal task
                let fallback = task.clone();
                (fallback, tokio::spawn(async move { runner.run(task).await }))
            })
            .collect();

        let (fallbacks, joins): (Vec<Task>, Vec<_>) = handles.into_iter().unzip();
        let mut finished = Vec::with_capacity(fallbacks.len() + removals.len());
        for (fallback, joined) in fallbacks.into_iter().zip(join_all(joins).await) {
            match joined {
                Ok(task) => finished.push(task),
                Err(e) => {
                    warn!(kind = fallback.kind.label(), error = %e, "delivery task panicked");
                    finished.push(fallback.fail(format!("task aborted: {}", e)));
                }
            }
        }

        let failed_labels: Vec<&str> = finished
            .iter()
            .filter(|t| t.status == TaskStatus::Failed)
            .map(|t| t.kind.label())
            .collect();

        for removal in removals {
            let done = if failed_labels.is_empty() {
                self.runner.run(removal).await
            } else {
                removal.fail(format!(
                    "keeping source file: {} did not complete",
                    failed_labels.join(", ")
                ))
            };
            finished.push(done);
        }

        finished
    }
}
