//! # Example: Basic
//!
//! Two long-running tasks under one operator; stop with Ctrl-C (or `kill -TERM`).
//!
//! Demonstrates how to:
//! - implement [`Task`] for a struct that stops via a shared [`CancellationToken`];
//! - build a closure task with [`TaskFn`] and a restart policy;
//! - route operator diagnostics to `tracing`.
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example basic
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use taskoperator::{Operator, Task, TaskConfig, TaskError, TaskFn, TaskRef, TracingLogger};

/// Prints a tick every second until shut down.
struct Ticker {
    stop: CancellationToken,
}

#[async_trait]
impl Task for Ticker {
    fn id(&self) -> &str {
        "ticker"
    }

    async fn run(&self, _ctx: CancellationToken) -> Result<(), TaskError> {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            tokio::select! {
                _ = self.stop.cancelled() => return Ok(()),
                _ = interval.tick() => println!("tick"),
            }
        }
    }

    async fn shutdown(&self, _ctx: CancellationToken) -> Result<(), TaskError> {
        self.stop.cancel();
        Ok(())
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let ticker: TaskRef = Arc::new(Ticker {
        stop: CancellationToken::new(),
    });

    // Fails on its first two attempts, then settles down until the run token is cancelled.
    let attempts = Arc::new(AtomicU64::new(0));
    let flaky: TaskRef = TaskFn::new("flaky", move |ctx: CancellationToken| {
        let attempts = attempts.clone();
        async move {
            let n = attempts.fetch_add(1, Ordering::Relaxed) + 1;
            if n <= 2 {
                tokio::time::sleep(Duration::from_secs(1)).await;
                return Err(TaskError::fail(format!("transient fail #{n}")));
            }
            println!("flaky up after {n} attempts");
            ctx.cancelled().await;
            Ok(())
        }
    })
    .with_config(TaskConfig::new(2, Duration::from_millis(500)))
    .into_arc();

    Operator::new([ticker, flaky])
        .with_logger(Arc::new(TracingLogger))
        .with_shutdown_deadline(Duration::from_secs(5))
        .run(CancellationToken::new())
        .await?;

    println!("operator stopped");
    Ok(())
}
