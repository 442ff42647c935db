//! # TracingLogger: forwards operator diagnostics to `tracing`
//!
//! Install any `tracing` subscriber (e.g. `tracing_subscriber::fmt`) and pass
//! `Arc::new(TracingLogger)` to [`Operator::with_logger`](crate::Operator::with_logger).
//!
//! ## Example output
//! ```text
//! ERROR taskoperator: task "worker" failed (failures=1): execution failed: connection refused
//!  INFO taskoperator: shutdown signal caught: SIGTERM
//!  INFO taskoperator: all tasks shut down gracefully
//! ```

use crate::logging::Logger;

/// Logger backed by the `tracing` macros (target `taskoperator`).
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Construct a new [`TracingLogger`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn info(&self, msg: &str) {
        tracing::info!(target: "taskoperator", "{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "taskoperator", "{msg}");
    }
}
