//! # Logger capability
//!
//! `Logger` is the only channel through which the operator reports failures:
//! recoverable task errors, permanent failures, shutdown errors and deadline
//! overruns. Calls are fire-and-forget.
//!
//! ## Example (skeleton)
//! ```rust
//! use taskoperator::Logger;
//!
//! struct Stderr;
//!
//! impl Logger for Stderr {
//!     fn info(&self, msg: &str) { eprintln!("INFO  {msg}"); }
//!     fn error(&self, msg: &str) { eprintln!("ERROR {msg}"); }
//! }
//! ```

use std::sync::Arc;

/// Sink for operator diagnostics.
///
/// Called from several tokio tasks at once; implementations must not block for long.
pub trait Logger: Send + Sync + 'static {
    /// Informational message (signal caught, clean shutdown).
    fn info(&self, msg: &str);

    /// Error message (task failure, shutdown error, deadline exceeded).
    fn error(&self, msg: &str);
}

/// Optional logger shared by the operator's background tasks.
///
/// Without a logger every call is a no-op.
#[derive(Clone, Default)]
pub(crate) struct LogSink(Option<Arc<dyn Logger>>);

impl LogSink {
    pub(crate) fn new(logger: Arc<dyn Logger>) -> Self {
        Self(Some(logger))
    }

    pub(crate) fn info(&self, msg: &str) {
        if let Some(log) = &self.0 {
            log.info(msg);
        }
    }

    pub(crate) fn error(&self, msg: &str) {
        if let Some(log) = &self.0 {
            log.error(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Logger for Recorder {
        fn info(&self, msg: &str) {
            self.0.lock().unwrap().push(format!("info:{msg}"));
        }
        fn error(&self, msg: &str) {
            self.0.lock().unwrap().push(format!("error:{msg}"));
        }
    }

    #[test]
    fn test_empty_sink_is_silent() {
        let sink = LogSink::default();
        sink.info("ignored");
        sink.error("ignored");
    }

    #[test]
    fn test_sink_forwards_levels() {
        let rec = Arc::new(Recorder::default());
        let sink = LogSink::new(rec.clone());
        sink.info("a");
        sink.error("b");
        assert_eq!(*rec.0.lock().unwrap(), vec!["info:a", "error:b"]);
    }
}
