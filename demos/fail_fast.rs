//! # Example: Fail fast
//!
//! One task exhausts its restart allowance; the operator shuts down the healthy
//! sibling and returns without any OS signal.
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example fail_fast
//! ```
//!
//! ## Expected output (abridged)
//! ```text
//! ERROR taskoperator: task "migrator" failed (failures=1): execution failed: schema locked
//! ERROR taskoperator: task "migrator" failed permanently: execution failed: schema locked
//!  INFO taskoperator: all tasks shut down gracefully
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use taskoperator::{Operator, TaskConfig, TaskError, TaskFn, TaskRef, TracingLogger};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let stop = CancellationToken::new();
    let wait = stop.clone();
    let server: TaskRef = TaskFn::new("server", move |_ctx: CancellationToken| {
        let wait = wait.clone();
        async move {
            wait.cancelled().await;
            println!("server drained");
            Ok::<_, TaskError>(())
        }
    })
    .with_shutdown(move |_ctx| {
        let stop = stop.clone();
        async move {
            stop.cancel();
            Ok(())
        }
    })
    .into_arc();

    // One restart allowed; the second failure is permanent.
    let migrator: TaskRef = TaskFn::new("migrator", |_ctx: CancellationToken| async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        Err::<(), _>(TaskError::fail("schema locked"))
    })
    .with_config(TaskConfig::new(1, Duration::from_millis(200)))
    .into_arc();

    Operator::new([server, migrator])
        .with_logger(Arc::new(TracingLogger))
        .run(CancellationToken::new())
        .await?;

    println!("operator stopped");
    Ok(())
}
