//! # Diagnostic events emitted by task wrappers.
//!
//! - [`ErrorReport`]: a recoverable task failure, delivered to the operator's
//!   report logger through a bounded channel.

mod report;

pub use report::ErrorReport;
