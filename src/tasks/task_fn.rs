//! # Function-backed task (`TaskFn`)
//!
//! [`TaskFn`] wraps a closure `F: Fn(CancellationToken) -> Fut`, producing a fresh
//! future per attempt, plus an optional shutdown closure. State shared between
//! `run` and `shutdown` has to live in the closures (e.g. an `Arc` or a
//! [`CancellationToken`] cloned into both).
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use taskoperator::{TaskConfig, TaskError, TaskFn, TaskRef};
//!
//! let stop = CancellationToken::new();
//! let wait = stop.clone();
//! let t: TaskRef = TaskFn::new("worker", move |_ctx: CancellationToken| {
//!     let wait = wait.clone();
//!     async move {
//!         wait.cancelled().await;
//!         Ok::<_, TaskError>(())
//!     }
//! })
//! .with_config(TaskConfig::unlimited())
//! .with_shutdown(move |_ctx| {
//!     let stop = stop.clone();
//!     async move {
//!         stop.cancel();
//!         Ok(())
//!     }
//! })
//! .into_arc();
//!
//! assert_eq!(t.id(), "worker");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::{FutureExt, future::BoxFuture};
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::tasks::{config::TaskConfig, task::Task};

type ShutdownFn =
    Box<dyn Fn(CancellationToken) -> BoxFuture<'static, Result<(), TaskError>> + Send + Sync>;

/// Function-backed task implementation.
pub struct TaskFn<F> {
    id: Cow<'static, str>,
    config: TaskConfig,
    run: F,
    shutdown: Option<ShutdownFn>,
}

impl<F> TaskFn<F> {
    /// Creates a task with the default [`TaskConfig`] and a no-op shutdown.
    pub fn new(id: impl Into<Cow<'static, str>>, run: F) -> Self {
        Self {
            id: id.into(),
            config: TaskConfig::default(),
            run,
            shutdown: None,
        }
    }

    /// Creates the task and returns it as a shared handle.
    pub fn arc(id: impl Into<Cow<'static, str>>, run: F) -> Arc<Self> {
        Arc::new(Self::new(id, run))
    }

    /// Sets the restart policy.
    #[must_use]
    pub fn with_config(mut self, config: TaskConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the closure invoked on graceful shutdown.
    #[must_use]
    pub fn with_shutdown<S, Fut>(mut self, shutdown: S) -> Self
    where
        S: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        self.shutdown = Some(Box::new(move |ctx| shutdown(ctx).boxed()));
        self
    }

    /// Wraps the task into an `Arc`.
    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl<F, Fut> Task for TaskFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn config(&self) -> TaskConfig {
        self.config
    }

    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
        (self.run)(ctx).await
    }

    async fn shutdown(&self, ctx: CancellationToken) -> Result<(), TaskError> {
        match &self.shutdown {
            Some(f) => f(ctx).await,
            None => Ok(()),
        }
    }
}
