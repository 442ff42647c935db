//! # taskoperator
//!
//! **taskoperator** supervises a fixed group of long-running async tasks inside
//! one process. It starts them concurrently, restarts a task on failure
//! according to its own [`TaskConfig`], and shuts the whole group down within a
//! deadline when a task fails permanently or a shutdown signal arrives.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │     Task     │   │     Task     │   │     Task     │
//!     │(user task #1)│   │(user task #2)│   │(user task #3)│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ TaskWrapper  │   │ TaskWrapper  │   │ TaskWrapper  │
//!     │(restart loop)│   │(restart loop)│   │(restart loop)│
//!     └┬────────┬────┘   └┬────────┬────┘   └┬────────┬────┘
//!      │        │         │        │         │        │
//!      │ ErrorReport      │ ErrorReport      │ ErrorReport   (recoverable)
//!      │        ▼         │        ▼         │        ▼
//!      │  ┌────────────────────────────────────────────────┐
//!      │  │      report channel (bounded mpsc) ─► Logger   │
//!      │  └────────────────────────────────────────────────┘
//!      ▼ permanent failure                              SignalSource
//! ┌──────────────────────────────────────────────────┐        │
//! │  Operator                                        │◄───────┘
//! │  select! { signal, fatal error }  (exactly once) │
//! │        └─► shutdown all wrappers concurrently    │
//! │            └─► race against shutdown deadline    │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ### Restart policy
//! ```text
//! max_failures <  0  → restart forever
//! max_failures == 0  → first failure is permanent (default)
//! max_failures == N  → up to N restarts; failure N+1 is permanent
//! ```
//! A permanent failure of **any** task shuts down the whole group.
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                        |
//! |-------------------|--------------------------------------------------------------|-------------------------------------------|
//! | **Tasks**         | Define tasks as trait impls or closures.                     | [`Task`], [`TaskFn`], [`TaskRef`]         |
//! | **Policies**      | Per-task failure allowance and restart delay.                | [`TaskConfig`]                            |
//! | **Supervision**   | Run the group, trigger and bound the shutdown.               | [`Operator`], [`OperatorConfig`]          |
//! | **Signals**       | OS or programmatic shutdown triggers.                        | [`SignalSource`], [`OsSignals`], [`ManualSignal`] |
//! | **Logging**       | Diagnostics sink; `tracing` adapter included.                | [`Logger`], [`TracingLogger`]             |
//! | **Errors**        | Typed errors for tasks and the runtime.                      | [`TaskError`], [`RuntimeError`]           |
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use taskoperator::{Operator, TaskConfig, TaskError, TaskFn, TaskRef, TracingLogger};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let worker: TaskRef = TaskFn::new("worker", |ctx: CancellationToken| async move {
//!         ctx.cancelled().await;
//!         Ok::<_, TaskError>(())
//!     })
//!     .with_config(TaskConfig::new(3, Duration::from_secs(1)))
//!     .into_arc();
//!
//!     // Blocks until SIGTERM/SIGINT/SIGQUIT or a permanent task failure.
//!     Operator::new([worker])
//!         .with_logger(Arc::new(TracingLogger))
//!         .with_shutdown_deadline(Duration::from_secs(10))
//!         .run(CancellationToken::new())
//!         .await?;
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod logging;
mod tasks;

// ---- Public re-exports ----

pub use crate::core::{
    DEFAULT_REPORT_CAPACITY, DEFAULT_SHUTDOWN_DEADLINE, ManualSignal, Operator, OperatorConfig,
    OperatorState, OsSignals, ShutdownSignal, SignalSource, TaskWrapper,
};
pub use error::{RuntimeError, TaskError};
pub use events::ErrorReport;
pub use logging::{Logger, TracingLogger};
pub use tasks::{Task, TaskConfig, TaskFn, TaskRef, TaskState};
