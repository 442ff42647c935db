//! # Per-task restart policy.
//!
//! [`TaskConfig`] decides whether a failed task is restarted and how long the
//! wrapper waits before the next attempt.
//!
//! ## Failure allowance
//! ```text
//! max_failures <  0  → unlimited (always restart)
//! max_failures == 0  → first failure is permanent (default)
//! max_failures == N  → restart up to N times; failure N+1 is permanent
//! ```
//!
//! ## Restart delay
//! `restart_delay == 0` means the next attempt starts immediately.

use std::time::Duration;

/// Restart policy of a single task. Immutable once the wrapper is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskConfig {
    max_failures: i32,
    restart_delay: Duration,
}

impl TaskConfig {
    /// Creates a config with the given failure allowance and restart delay.
    pub fn new(max_failures: i32, restart_delay: Duration) -> Self {
        Self {
            max_failures,
            restart_delay,
        }
    }

    /// Config that restarts the task after every failure.
    pub fn unlimited() -> Self {
        Self::new(-1, Duration::ZERO)
    }

    /// Returns a copy with the given restart delay.
    #[must_use]
    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    /// Returns `true` if the task is restarted regardless of the failure count.
    #[inline]
    pub fn is_unlimited(&self) -> bool {
        self.max_failures < 0
    }

    /// Returns `true` if a delay is applied between attempts.
    #[inline]
    pub fn has_restart_delay(&self) -> bool {
        self.restart_delay > Duration::ZERO
    }

    /// Raw failure threshold (negative = unlimited).
    #[inline]
    pub fn max_failures(&self) -> i32 {
        self.max_failures
    }

    /// Delay before the next attempt, `None` when there is none.
    #[inline]
    pub fn restart_delay(&self) -> Option<Duration> {
        self.has_restart_delay().then_some(self.restart_delay)
    }

    /// Whether another attempt is allowed after `failures` cumulative failures.
    #[inline]
    pub fn allows_restart(&self, failures: u32) -> bool {
        self.is_unlimited() || i64::from(failures) <= i64::from(self.max_failures)
    }
}
