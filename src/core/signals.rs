//! # Shutdown signal sources.
//!
//! The operator does not talk to the OS directly. It asks a [`SignalSource`] to
//! start listening for a set of [`ShutdownSignal`]s and awaits the returned
//! future, which resolves with the first matching signal.
//!
//! ## Implementations
//! - [`OsSignals`]: real process signals via [`tokio::signal`].
//!   **Unix:** every [`ShutdownSignal`] maps to its `SIG*` counterpart.
//!   **Other platforms:** only [`ShutdownSignal::Interrupt`] (Ctrl-C) is delivered.
//! - [`ManualSignal`]: raised programmatically with [`ManualSignal::raise`];
//!   used by tests and by applications that decide on shutdown themselves.

use std::fmt;
use std::io;
use std::sync::Arc;

use futures::{
    FutureExt,
    future::{self, BoxFuture},
};
use tokio::sync::{Mutex, mpsc};

/// Kind of signal that requests a graceful shutdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShutdownSignal {
    /// `SIGTERM`.
    Terminate,
    /// `SIGINT` (Ctrl-C).
    Interrupt,
    /// `SIGQUIT`.
    Quit,
    /// `SIGHUP`.
    Hangup,
    /// `SIGUSR1`.
    User1,
    /// `SIGUSR2`.
    User2,
}

impl ShutdownSignal {
    /// Signals that trigger shutdown unless configured otherwise.
    pub const DEFAULT: [ShutdownSignal; 3] = [
        ShutdownSignal::Terminate,
        ShutdownSignal::Interrupt,
        ShutdownSignal::Quit,
    ];

    /// Conventional `SIG*` name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShutdownSignal::Terminate => "SIGTERM",
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Quit => "SIGQUIT",
            ShutdownSignal::Hangup => "SIGHUP",
            ShutdownSignal::User1 => "SIGUSR1",
            ShutdownSignal::User2 => "SIGUSR2",
        }
    }

    #[cfg(unix)]
    fn as_unix(self) -> tokio::signal::unix::SignalKind {
        use tokio::signal::unix::SignalKind;

        match self {
            ShutdownSignal::Terminate => SignalKind::terminate(),
            ShutdownSignal::Interrupt => SignalKind::interrupt(),
            ShutdownSignal::Quit => SignalKind::quit(),
            ShutdownSignal::Hangup => SignalKind::hangup(),
            ShutdownSignal::User1 => SignalKind::user_defined1(),
            ShutdownSignal::User2 => SignalKind::user_defined2(),
        }
    }
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of "shutdown requested" notifications.
pub trait SignalSource: Send + Sync + 'static {
    /// Starts listening for `kinds` and returns a future resolving with the
    /// first one received.
    ///
    /// Registration happens eagerly, inside this call; an error means no signal
    /// will ever be delivered through this source.
    fn listen(&self, kinds: &[ShutdownSignal]) -> io::Result<BoxFuture<'static, ShutdownSignal>>;
}

/// Process signals delivered by the OS.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsSignals;

impl SignalSource for OsSignals {
    #[cfg(unix)]
    fn listen(&self, kinds: &[ShutdownSignal]) -> io::Result<BoxFuture<'static, ShutdownSignal>> {
        use tokio::signal::unix::signal;

        let mut waiters = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            let mut stream = signal(kind.as_unix())?;
            waiters.push(
                async move {
                    stream.recv().await;
                    kind
                }
                .boxed(),
            );
        }
        if waiters.is_empty() {
            return Ok(future::pending().boxed());
        }
        Ok(async move { future::select_all(waiters).await.0 }.boxed())
    }

    #[cfg(not(unix))]
    fn listen(&self, kinds: &[ShutdownSignal]) -> io::Result<BoxFuture<'static, ShutdownSignal>> {
        if !kinds.contains(&ShutdownSignal::Interrupt) {
            return Ok(future::pending().boxed());
        }
        Ok(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => ShutdownSignal::Interrupt,
                Err(_) => future::pending().await,
            }
        }
        .boxed())
    }
}

/// Signal source triggered from code.
///
/// Signals raised before the operator starts listening are buffered; signals
/// outside the configured set are discarded.
///
/// # Example
/// ```
/// use taskoperator::{ManualSignal, ShutdownSignal};
///
/// let signal = ManualSignal::new();
/// signal.raise(ShutdownSignal::Terminate);
/// ```
#[derive(Clone, Debug)]
pub struct ManualSignal {
    tx: mpsc::UnboundedSender<ShutdownSignal>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<ShutdownSignal>>>,
}

impl ManualSignal {
    /// Creates a new, untriggered source.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Delivers `signal` to the listener.
    pub fn raise(&self, signal: ShutdownSignal) {
        let _ = self.tx.send(signal);
    }
}

impl Default for ManualSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalSource for ManualSignal {
    fn listen(&self, kinds: &[ShutdownSignal]) -> io::Result<BoxFuture<'static, ShutdownSignal>> {
        let rx = Arc::clone(&self.rx);
        let kinds = kinds.to_vec();
        Ok(async move {
            let mut rx = rx.lock().await;
            while let Some(sig) = rx.recv().await {
                if kinds.contains(&sig) {
                    return sig;
                }
            }
            future::pending().await
        }
        .boxed())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_signal_names() {
        assert_eq!(ShutdownSignal::Terminate.to_string(), "SIGTERM");
        assert_eq!(ShutdownSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownSignal::Quit.to_string(), "SIGQUIT");
        assert_eq!(ShutdownSignal::User1.as_str(), "SIGUSR1");
    }

    #[tokio::test]
    async fn test_manual_signal_buffered_before_listen() {
        let src = ManualSignal::new();
        src.raise(ShutdownSignal::Terminate);
        let fut = src.listen(&ShutdownSignal::DEFAULT).unwrap();
        assert_eq!(fut.await, ShutdownSignal::Terminate);
    }

    #[tokio::test]
    async fn test_manual_signal_ignores_unconfigured_kinds() {
        let src = ManualSignal::new();
        src.raise(ShutdownSignal::User1);
        src.raise(ShutdownSignal::Hangup);
        let fut = src.listen(&[ShutdownSignal::Hangup]).unwrap();
        assert_eq!(fut.await, ShutdownSignal::Hangup);
    }

    #[tokio::test]
    async fn test_manual_signal_pending_without_match() {
        let src = ManualSignal::new();
        src.raise(ShutdownSignal::User2);
        let fut = src.listen(&[ShutdownSignal::Terminate]).unwrap();
        let res = tokio::time::timeout(Duration::from_millis(50), fut).await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn test_os_signals_empty_set_never_fires() {
        let fut = OsSignals.listen(&[]).unwrap();
        let res = tokio::time::timeout(Duration::from_millis(20), fut).await;
        assert!(res.is_err());
    }
}
