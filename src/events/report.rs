//! # Recoverable failure reports.
//!
//! Every time a task fails but still has restarts left, its wrapper sends an
//! [`ErrorReport`] on the operator's shared report channel. The operator's report
//! logger turns each one into a single error log line.
//!
//! ## Ordering guarantees
//! Reports of one task arrive in the order the task failed (one producer per
//! task, FIFO channel); `failures` strictly increases per task. There is no
//! ordering across tasks.
//!
//! Reports are diagnostics only. Control flow never depends on them.

use std::fmt;
use std::sync::Arc;

use crate::error::TaskError;

/// Diagnostic record of a recoverable task failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorReport {
    /// Id of the failed task.
    pub task: Arc<str>,
    /// Cumulative failure count, including this failure.
    pub failures: u32,
    /// Error returned (or panic caught) by this attempt.
    pub error: TaskError,
}

impl ErrorReport {
    /// Creates a report for `task` after `failures` cumulative failures.
    pub fn new(task: Arc<str>, failures: u32, error: TaskError) -> Self {
        Self {
            task,
            failures,
            error,
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "task \"{}\" failed (failures={}): {}",
            self.task, self.failures, self.error
        )
    }
}
