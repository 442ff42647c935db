//! # Per-task failure counters.
//!
//! [`TaskState`] is written only by the owning wrapper's run loop. The shutdown
//! fan-out reads `is_failed` from another tokio task, so both fields are atomics:
//! `mark_failed` happens before the fatal error is handed to the operator, and
//! the operator only starts shutdown after receiving it.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Failure count and permanent-failure flag of one task.
#[derive(Debug, Default)]
pub struct TaskState {
    failures: AtomicU32,
    failed: AtomicBool,
}

impl TaskState {
    /// Creates a fresh state: no failures, not failed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more failure and returns the cumulative count.
    pub(crate) fn record_failure(&self) -> u32 {
        self.failures.fetch_add(1, Ordering::AcqRel).saturating_add(1)
    }

    /// Marks the task as permanently failed. There is no way back.
    pub(crate) fn mark_failed(&self) {
        self.failed.store(true, Ordering::Release);
    }

    /// Returns the cumulative number of failures.
    pub fn failures(&self) -> u32 {
        self.failures.load(Ordering::Acquire)
    }

    /// Returns `true` once the task exhausted its restart allowance.
    pub fn is_failed(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = TaskState::new();
        assert!(!state.is_failed());
        assert_eq!(state.failures(), 0);
    }

    #[test]
    fn test_record_failure() {
        let state = TaskState::new();
        for expected in 1..=10 {
            assert_eq!(state.record_failure(), expected);
        }
        assert_eq!(state.failures(), 10);
    }

    #[test]
    fn test_mark_failed_is_one_way() {
        let state = TaskState::new();
        state.mark_failed();
        assert!(state.is_failed());
        state.mark_failed();
        assert!(state.is_failed());
    }
}
