//! # Task abstraction.
//!
//! A [`Task`] is a long-running unit of work with a stable [`id`](Task::id),
//! a restart policy ([`config`](Task::config)), a blocking [`run`](Task::run)
//! and a best-effort [`shutdown`](Task::shutdown).
//!
//! `run` is expected to block until the work is finished or until `shutdown`
//! asks it to stop. The [`CancellationToken`] passed to both methods is a hint
//! only: the operator never relies on tasks observing it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{error::TaskError, tasks::config::TaskConfig};

/// Shared handle to a task.
pub type TaskRef = Arc<dyn Task>;

/// # Long-running, restartable unit of work.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use taskoperator::{Task, TaskConfig, TaskError};
///
/// struct Server {
///     stop: CancellationToken,
/// }
///
/// #[async_trait]
/// impl Task for Server {
///     fn id(&self) -> &str { "server" }
///
///     fn config(&self) -> TaskConfig { TaskConfig::unlimited() }
///
///     async fn run(&self, _ctx: CancellationToken) -> Result<(), TaskError> {
///         self.stop.cancelled().await;
///         Ok(())
///     }
///
///     async fn shutdown(&self, _ctx: CancellationToken) -> Result<(), TaskError> {
///         self.stop.cancel();
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task id (used in logs).
    ///
    /// Called once, when the operator is constructed. Unlike `run` and
    /// `shutdown` it is not panic-guarded: a panic here propagates out of
    /// [`Operator::new`](crate::Operator::new).
    fn id(&self) -> &str;

    /// Returns the restart policy. Read once, when the task is wrapped.
    ///
    /// Not panic-guarded, same as [`Task::id`].
    fn config(&self) -> TaskConfig {
        TaskConfig::default()
    }

    /// Runs the task until it finishes or fails.
    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError>;

    /// Asks a running task to stop gracefully.
    ///
    /// `ctx` is cancelled when the operator's shutdown deadline elapses.
    async fn shutdown(&self, ctx: CancellationToken) -> Result<(), TaskError>;
}
