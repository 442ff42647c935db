//! Error types used by the operator runtime and tasks.
//!
//! This module defines two enums:
//!
//! - [`RuntimeError`]: misuse of the [`Operator`](crate::Operator) itself.
//! - [`TaskError`]: failures of individual task executions (run or shutdown).
//!
//! Task errors never escape [`Operator::run`](crate::Operator::run); they are
//! reported through the configured [`Logger`](crate::Logger) only.

use std::any::Any;
use std::fmt::Display;

use thiserror::Error;

/// # Errors produced by the operator runtime.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// [`Operator::run`](crate::Operator::run) was called more than once.
    #[error("operator has already been started")]
    AlreadyStarted,
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskoperator::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::AlreadyStarted.as_label(), "runtime_already_started");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::AlreadyStarted => "runtime_already_started",
        }
    }
}

/// # Errors produced by task execution.
///
/// Both variants count as a failure of the attempt that produced them.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task returned an error.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task panicked; the panic was caught at the wrapper boundary.
    #[error("panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl TaskError {
    /// Shorthand for [`TaskError::Fail`].
    ///
    /// # Example
    /// ```
    /// use taskoperator::TaskError;
    ///
    /// let err = TaskError::fail("connection refused");
    /// assert_eq!(err.to_string(), "execution failed: connection refused");
    /// ```
    pub fn fail(error: impl Display) -> Self {
        TaskError::Fail {
            error: error.to_string(),
        }
    }

    /// Builds a [`TaskError::Panicked`] from a `catch_unwind` payload.
    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let info = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        TaskError::Panicked { info }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Panicked { .. } => "task_panicked",
        }
    }

    /// Returns `true` if the error stands for a caught panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, TaskError::Panicked { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_payload_str() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        let err = TaskError::from_panic(payload.as_ref());
        assert_eq!(
            err,
            TaskError::Panicked {
                info: "boom".into()
            }
        );
        assert!(err.is_panic());
    }

    #[test]
    fn test_panic_payload_string() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        let err = TaskError::from_panic(payload.as_ref());
        assert_eq!(err.to_string(), "panicked: owned boom");
    }

    #[test]
    fn test_panic_payload_unknown() {
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        let err = TaskError::from_panic(payload.as_ref());
        assert_eq!(err.to_string(), "panicked: unknown panic");
        assert_eq!(err.as_label(), "task_panicked");
    }

    #[test]
    fn test_fail_label() {
        let err = TaskError::fail("x");
        assert_eq!(err.as_label(), "task_failed");
        assert!(!err.is_panic());
    }
}
