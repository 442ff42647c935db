//! # Operator configuration.
//!
//! Provides [`OperatorConfig`] centralized settings for the operator runtime.
//!
//! Config is used in two ways:
//! 1. **Construction**: `Operator::from_config(config, tasks)`
//! 2. **Builder setters**: `with_shutdown_deadline` / `with_shutdown_signals`
//!    override individual fields after construction.

use std::time::Duration;

use crate::core::signals::ShutdownSignal;

/// Default hard budget for the graceful shutdown of all tasks.
pub const DEFAULT_SHUTDOWN_DEADLINE: Duration = Duration::from_secs(30);

/// Default capacity of the error-report channel.
pub const DEFAULT_REPORT_CAPACITY: usize = 128;

/// Settings of an [`Operator`](crate::Operator).
///
/// ## Field semantics
/// - `shutdown_deadline`: wall-clock budget for all task shutdowns together
/// - `shutdown_signals`: signals that start the shutdown sequence (empty = signals never fire)
/// - `report_capacity`: error-report channel size (min 1; clamped)
#[derive(Clone, Debug)]
pub struct OperatorConfig {
    /// Maximum time to wait for task shutdowns before giving up on them.
    pub shutdown_deadline: Duration,

    /// Signals that request a graceful shutdown.
    pub shutdown_signals: Vec<ShutdownSignal>,

    /// Capacity of the channel carrying [`ErrorReport`](crate::ErrorReport)s.
    ///
    /// Wrappers wait for room when it is full, so keep it larger than the
    /// expected burst of restarts.
    pub report_capacity: usize,
}

impl OperatorConfig {
    /// Returns the report channel capacity clamped to a minimum of 1.
    #[inline]
    pub fn report_capacity_clamped(&self) -> usize {
        self.report_capacity.max(1)
    }
}

impl Default for OperatorConfig {
    /// Default configuration:
    ///
    /// - `shutdown_deadline = 30s`
    /// - `shutdown_signals = [SIGTERM, SIGINT, SIGQUIT]`
    /// - `report_capacity = 128`
    fn default() -> Self {
        Self {
            shutdown_deadline: DEFAULT_SHUTDOWN_DEADLINE,
            shutdown_signals: ShutdownSignal::DEFAULT.to_vec(),
            report_capacity: DEFAULT_REPORT_CAPACITY,
        }
    }
}
