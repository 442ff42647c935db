//! # TaskWrapper: restart loop around one user task.
//!
//! Supervises execution of one [`Task`] with its [`TaskConfig`]:
//! - restarts while the failure allowance is not exhausted,
//! - waits `restart_delay` between attempts (cancellable),
//! - converts panics into errors,
//! - reports every recoverable failure as an [`ErrorReport`].
//!
//! ## Architecture
//! ```text
//! Operator ──► TaskWrapper::run()
//!
//! loop {
//!   ├─► guarded(task.run(ctx))
//!   │       ├─ Ok  ──► return Ok
//!   │       └─ Err ──► failures += 1
//!   │                  ├─ allows_restart(failures):
//!   │                  │    ├─ send ErrorReport{ task, failures, error }
//!   │                  │    ├─ sleep(restart_delay) (cancellable → return Ok)
//!   │                  │    └─ continue
//!   │                  └─ otherwise:
//!   │                       ├─ mark_failed()
//!   │                       └─ return Err(error)   → fatal for the whole group
//! }
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially** (never concurrent for one wrapper)
//! - The failure counter never resets
//! - `shutdown` is a no-op once the task is permanently failed

use std::sync::Arc;

use tokio::{select, sync::mpsc, time};
use tokio_util::sync::CancellationToken;

use crate::{
    core::runner::guarded,
    error::TaskError,
    events::ErrorReport,
    tasks::{TaskConfig, TaskRef, TaskState},
};

/// Owns one task together with its restart policy and failure state.
pub struct TaskWrapper {
    id: Arc<str>,
    task: TaskRef,
    config: TaskConfig,
    state: TaskState,
    reports: mpsc::Sender<ErrorReport>,
}

impl TaskWrapper {
    /// Wraps `task`, capturing its id and config once.
    ///
    /// Recoverable failures are sent on `reports`.
    pub fn new(task: TaskRef, reports: mpsc::Sender<ErrorReport>) -> Self {
        Self {
            id: Arc::from(task.id()),
            config: task.config(),
            task,
            state: TaskState::new(),
            reports,
        }
    }

    /// Task id, constant for the wrapper's lifetime.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Restart policy captured at construction.
    pub fn config(&self) -> TaskConfig {
        self.config
    }

    /// Failure counters of the task.
    pub fn state(&self) -> &TaskState {
        &self.state
    }

    /// Runs the task, restarting it on failure as long as the policy allows.
    ///
    /// Returns `Ok(())` when an attempt succeeds (or `ctx` is cancelled during a
    /// restart delay) and the last error once the allowance is exhausted.
    pub async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
        loop {
            let err = match guarded(self.task.run(ctx.clone())).await {
                Ok(()) => return Ok(()),
                Err(e) => e,
            };

            let failures = self.state.record_failure();
            if !self.config.allows_restart(failures) {
                self.state.mark_failed();
                return Err(err);
            }
            self.report(failures, err).await;

            if let Some(delay) = self.config.restart_delay() {
                let sleep = time::sleep(delay);
                tokio::pin!(sleep);
                select! {
                    _ = &mut sleep => {}
                    _ = ctx.cancelled() => return Ok(()),
                }
            }
        }
    }

    /// Asks the task to stop. No-op for a permanently failed task.
    pub async fn shutdown(&self, ctx: CancellationToken) -> Result<(), TaskError> {
        if self.state.is_failed() {
            return Ok(());
        }
        guarded(self.task.shutdown(ctx)).await
    }

    /// Sends a report; dropped silently once the operator stopped listening.
    async fn report(&self, failures: u32, error: TaskError) {
        let report = ErrorReport::new(Arc::clone(&self.id), failures, error);
        let _ = self.reports.send(report).await;
    }
}
