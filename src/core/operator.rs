//! # Operator: runs a fixed task group and shuts it down as a whole.
//!
//! The [`Operator`] owns one [`TaskWrapper`] per task, the shared error-report
//! channel, the signal source and the logger.
//!
//! ## Key responsibilities
//! - spawn every wrapper's restart loop
//! - forward [`ErrorReport`]s to the logger while running
//! - start exactly one shutdown on the first shutdown signal **or** permanent task failure
//! - shut all tasks down concurrently within [`OperatorConfig::shutdown_deadline`]
//!
//! ## High-level architecture
//! ```text
//! run(ctx):
//!   SignalSource::listen(shutdown_signals)      ─► signal future
//!   report logger:  ErrorReport rx ─► Logger::error            (until shutdown begins)
//!   TaskWrapper[0..N].run(ctx.child_token())    ─► Err ─► fatal channel
//!
//! select! (once):
//!   ├─ signal      ─► log info
//!   └─ fatal error ─► log error
//!         │
//!         ▼
//! shutdown_all():
//!   TaskWrapper[0..N].shutdown(token)  (concurrently)
//!         ├─ Err  → log per task, count
//!         └─ wait all with deadline:
//!              ├─ all joined  → "{n} errors during shutdown" | "all tasks shut down gracefully"
//!              └─ timed out   → token.cancel(), "shutdown deadline ... exceeded", detach laggards
//!         │
//!         ▼
//!   run_token.cancel() ─► Ok(())
//! ```
//!
//! ## Lifecycle
//! `Idle → Running → ShuttingDown → Stopped`, observable through [`Operator::state`].
//!
//! ## Return value
//! [`Operator::run`] returns `Ok(())` whatever happened to the tasks; failures are
//! only visible through the [`Logger`]. The only error is calling `run` twice.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use taskoperator::{ManualSignal, Operator, ShutdownSignal, TaskError, TaskFn, TaskRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stop = CancellationToken::new();
//!     let wait = stop.clone();
//!     let ticker: TaskRef = TaskFn::new("ticker", move |_ctx: CancellationToken| {
//!         let wait = wait.clone();
//!         async move {
//!             wait.cancelled().await;
//!             Ok::<_, TaskError>(())
//!         }
//!     })
//!     .with_shutdown(move |_ctx| {
//!         let stop = stop.clone();
//!         async move {
//!             stop.cancel();
//!             Ok(())
//!         }
//!     })
//!     .into_arc();
//!
//!     let signal = ManualSignal::new();
//!     let op = Operator::new([ticker])
//!         .with_signal_source(signal.clone())
//!         .with_shutdown_deadline(Duration::from_secs(5));
//!
//!     signal.raise(ShutdownSignal::Terminate);
//!     op.run(CancellationToken::new()).await?;
//!     Ok(())
//! }
//! ```

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicU8, AtomicUsize, Ordering},
};
use std::time::Duration;

use futures::{FutureExt, future};
use tokio::{select, sync::mpsc, task::JoinSet, time};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::OperatorConfig,
        signals::{OsSignals, ShutdownSignal, SignalSource},
        wrapper::TaskWrapper,
    },
    error::{RuntimeError, TaskError},
    events::ErrorReport,
    logging::{LogSink, Logger},
    tasks::TaskRef,
};

/// Lifecycle phase of an [`Operator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum OperatorState {
    /// Constructed, `run` not called yet.
    Idle = 0,
    /// Tasks are running; waiting for a signal or a permanent failure.
    Running = 1,
    /// Shutdown sequence in progress.
    ShuttingDown = 2,
    /// Shutdown finished (cleanly or by deadline).
    Stopped = 3,
}

impl OperatorState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => OperatorState::Idle,
            1 => OperatorState::Running,
            2 => OperatorState::ShuttingDown,
            _ => OperatorState::Stopped,
        }
    }
}

/// Permanent failure of one task, handed from its run loop to the operator.
struct Fatal {
    task: Arc<str>,
    error: TaskError,
}

/// Supervises a fixed group of tasks and coordinates their graceful shutdown.
pub struct Operator {
    cfg: OperatorConfig,
    tasks: Vec<Arc<TaskWrapper>>,
    reports: Mutex<Option<mpsc::Receiver<ErrorReport>>>,
    signals: Arc<dyn SignalSource>,
    log: LogSink,
    state: AtomicU8,
}

impl Operator {
    /// Creates an operator with [`OperatorConfig::default`], OS signals and no logger.
    pub fn new(tasks: impl IntoIterator<Item = TaskRef>) -> Self {
        Self::from_config(OperatorConfig::default(), tasks)
    }

    /// Creates an operator with the given configuration.
    ///
    /// One [`TaskWrapper`] is built per task; the group is fixed from here on.
    pub fn from_config(cfg: OperatorConfig, tasks: impl IntoIterator<Item = TaskRef>) -> Self {
        let (tx, rx) = mpsc::channel(cfg.report_capacity_clamped());
        let tasks = tasks
            .into_iter()
            .map(|task| Arc::new(TaskWrapper::new(task, tx.clone())))
            .collect();

        Self {
            cfg,
            tasks,
            reports: Mutex::new(Some(rx)),
            signals: Arc::new(OsSignals),
            log: LogSink::default(),
            state: AtomicU8::new(OperatorState::Idle as u8),
        }
    }

    /// Sets the logger. Without one, diagnostics are discarded.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.log = LogSink::new(logger);
        self
    }

    /// Sets the shutdown deadline (default 30s).
    #[must_use]
    pub fn with_shutdown_deadline(mut self, deadline: Duration) -> Self {
        self.cfg.shutdown_deadline = deadline;
        self
    }

    /// Sets the signals that trigger shutdown (default SIGTERM, SIGINT, SIGQUIT).
    #[must_use]
    pub fn with_shutdown_signals(
        mut self,
        signals: impl IntoIterator<Item = ShutdownSignal>,
    ) -> Self {
        self.cfg.shutdown_signals = signals.into_iter().collect();
        self
    }

    /// Replaces the OS signal source (e.g. with a [`ManualSignal`](crate::ManualSignal)).
    #[must_use]
    pub fn with_signal_source(mut self, source: impl SignalSource) -> Self {
        self.signals = Arc::new(source);
        self
    }

    /// Configured shutdown deadline.
    pub fn shutdown_deadline(&self) -> Duration {
        self.cfg.shutdown_deadline
    }

    /// Configured shutdown signals.
    pub fn shutdown_signals(&self) -> &[ShutdownSignal] {
        &self.cfg.shutdown_signals
    }

    /// Ids of the supervised tasks, in construction order.
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|w| w.id())
    }

    /// Looks up the wrapper of a task by id.
    pub fn task(&self, id: &str) -> Option<&TaskWrapper> {
        self.tasks.iter().find(|w| w.id() == id).map(|w| w.as_ref())
    }

    /// Current lifecycle phase.
    pub fn state(&self) -> OperatorState {
        OperatorState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Runs all tasks until shutdown completes.
    ///
    /// `ctx` is the parent of every task's run token; it is cancelled for the
    /// tasks once shutdown finished. Cancelling it does not start a shutdown.
    ///
    /// Always returns `Ok(())` for task outcomes; returns
    /// [`RuntimeError::AlreadyStarted`] if called a second time.
    pub async fn run(&self, ctx: CancellationToken) -> Result<(), RuntimeError> {
        self.state
            .compare_exchange(
                OperatorState::Idle as u8,
                OperatorState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map_err(|_| RuntimeError::AlreadyStarted)?;

        let signal = match self.signals.listen(&self.cfg.shutdown_signals) {
            Ok(fut) => fut,
            Err(e) => {
                self.log
                    .error(&format!("failed to listen for shutdown signals: {e}"));
                future::pending().boxed()
            }
        };

        let reporting = CancellationToken::new();
        let reports = self
            .reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(rx) = reports {
            self.report_listener(rx, reporting.clone());
        }

        let run_token = ctx.child_token();
        let (fatal_tx, mut fatal_rx) = mpsc::channel(self.tasks.len().max(1));
        let mut set = JoinSet::new();
        self.spawn_wrappers(&mut set, &run_token, fatal_tx);

        select! {
            sig = signal => {
                self.log.info(&format!("shutdown signal caught: {sig}"));
            }
            Some(fatal) = fatal_rx.recv() => {
                self.log.error(&format!(
                    "task \"{}\" failed permanently: {}",
                    fatal.task, fatal.error
                ));
            }
        }

        self.set_state(OperatorState::ShuttingDown);
        reporting.cancel();
        self.shutdown_all().await;

        run_token.cancel();
        set.detach_all();
        self.set_state(OperatorState::Stopped);
        Ok(())
    }

    fn set_state(&self, state: OperatorState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Forwards error reports to the logger until `token` is cancelled.
    fn report_listener(&self, mut rx: mpsc::Receiver<ErrorReport>, token: CancellationToken) {
        let log = self.log.clone();
        tokio::spawn(async move {
            loop {
                select! {
                    biased;
                    _ = token.cancelled() => break,
                    report = rx.recv() => match report {
                        Some(report) => log.error(&report.to_string()),
                        None => break,
                    },
                }
            }
        });
    }

    /// Spawns every wrapper's run loop; permanent failures go to `fatal`.
    fn spawn_wrappers(
        &self,
        set: &mut JoinSet<()>,
        run_token: &CancellationToken,
        fatal: mpsc::Sender<Fatal>,
    ) {
        for wrapper in &self.tasks {
            let wrapper = Arc::clone(wrapper);
            let ctx = run_token.child_token();
            let fatal = fatal.clone();
            set.spawn(async move {
                if let Err(error) = wrapper.run(ctx).await {
                    let task = Arc::from(wrapper.id());
                    let _ = fatal.send(Fatal { task, error }).await;
                }
            });
        }
    }

    /// Shuts every task down concurrently, bounded by the deadline.
    ///
    /// Shutdowns still running at the deadline are detached, not aborted.
    async fn shutdown_all(&self) {
        let deadline = self.cfg.shutdown_deadline;
        let token = CancellationToken::new();
        let errors = Arc::new(AtomicUsize::new(0));

        let mut set = JoinSet::new();
        for wrapper in &self.tasks {
            let wrapper = Arc::clone(wrapper);
            let token = token.clone();
            let errors = Arc::clone(&errors);
            let log = self.log.clone();
            set.spawn(async move {
                if let Err(e) = wrapper.shutdown(token).await {
                    errors.fetch_add(1, Ordering::Relaxed);
                    log.error(&format!("shutdown of task \"{}\" failed: {e}", wrapper.id()));
                }
            });
        }

        let all_done = async { while set.join_next().await.is_some() {} };
        let finished = time::timeout(deadline, all_done).await.is_ok();

        if finished {
            match errors.load(Ordering::Relaxed) {
                0 => self.log.info("all tasks shut down gracefully"),
                n => self.log.error(&format!("{n} errors during shutdown")),
            }
        } else {
            token.cancel();
            self.log
                .error(&format!("shutdown deadline of {deadline:?} exceeded"));
            set.detach_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::tasks::{TaskConfig, TaskFn};

    fn idle(id: &'static str) -> TaskRef {
        TaskFn::arc(id, |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Ok::<_, TaskError>(())
        })
    }

    #[test]
    fn test_base_configuration() {
        let op = Operator::new([idle("a"), idle("b")]);
        assert_eq!(op.shutdown_deadline(), Duration::from_secs(30));
        assert_eq!(op.shutdown_signals(), &ShutdownSignal::DEFAULT);
        assert_eq!(op.task_ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(op.state(), OperatorState::Idle);

        let op = op
            .with_shutdown_deadline(Duration::from_secs(5))
            .with_shutdown_signals([ShutdownSignal::User1]);
        assert_eq!(op.shutdown_deadline(), Duration::from_secs(5));
        assert_eq!(op.shutdown_signals(), &[ShutdownSignal::User1]);
    }

    #[test]
    fn test_from_config() {
        let cfg = OperatorConfig {
            shutdown_deadline: Duration::from_millis(250),
            shutdown_signals: vec![ShutdownSignal::Hangup],
            report_capacity: 4,
        };
        let op = Operator::from_config(cfg, [idle("a")]);

        assert_eq!(op.shutdown_deadline(), Duration::from_millis(250));
        assert_eq!(op.shutdown_signals(), &[ShutdownSignal::Hangup]);
        assert_eq!(op.task_ids().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_task_lookup() {
        let t: TaskRef = TaskFn::new("cfg", |_ctx: CancellationToken| async {
            Ok::<_, TaskError>(())
        })
        .with_config(TaskConfig::unlimited())
        .into_arc();
        let op = Operator::new([t]);

        assert!(op.task("missing").is_none());
        let w = op.task("cfg").unwrap();
        assert!(w.config().is_unlimited());
    }

    #[test]
    fn test_state_roundtrip() {
        for s in [
            OperatorState::Idle,
            OperatorState::Running,
            OperatorState::ShuttingDown,
            OperatorState::Stopped,
        ] {
            assert_eq!(OperatorState::from_u8(s as u8), s);
        }
    }
}
