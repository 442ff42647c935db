//! # Logging capability.
//!
//! - [`Logger`]: trait the operator reports through.
//! - [`TracingLogger`]: ready-made implementation on top of `tracing`.

mod sink;
mod writer;

pub(crate) use sink::LogSink;
pub use sink::Logger;
pub use writer::TracingLogger;
