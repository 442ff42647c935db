//! # Task abstractions.
//!
//! This module provides the user-facing task types:
//! - [`Task`] - trait for long-running, restartable tasks
//! - [`TaskFn`] - closure-backed task implementation
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn Task>`)
//! - [`TaskConfig`] - per-task restart policy
//! - [`TaskState`] - per-task failure counters

mod config;
mod state;
mod task;
mod task_fn;

pub use config::TaskConfig;
pub use state::TaskState;
pub use task::{Task, TaskRef};
pub use task_fn::TaskFn;
