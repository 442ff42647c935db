//! Runtime core: supervision and shutdown coordination.
//!
//! Internal modules:
//! - [`runner`]: panic-guarded execution of a single task call;
//! - [`wrapper`]: restart loop of one task;
//! - [`operator`]: spawns wrappers, waits for the shutdown trigger, drives the deadline-bounded shutdown;
//! - [`signals`]: signal sources (OS and manual);
//! - [`config`]: operator settings.

mod config;
mod operator;
mod runner;
mod signals;
mod wrapper;

pub use config::{DEFAULT_REPORT_CAPACITY, DEFAULT_SHUTDOWN_DEADLINE, OperatorConfig};
pub use operator::{Operator, OperatorState};
pub use signals::{ManualSignal, OsSignals, ShutdownSignal, SignalSource};
pub use wrapper::TaskWrapper;
