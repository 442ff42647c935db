//! # Panic-guarded execution of one task call.
//!
//! Both `Task::run` attempts and `Task::shutdown` calls go through [`guarded`],
//! so a panic inside user code becomes a [`TaskError::Panicked`] instead of
//! unwinding through the wrapper.
//!
//! ```text
//! fut ──► catch_unwind ──┬─ Ok(res)    → res
//!                        └─ Err(panic) → Err(TaskError::Panicked { info })
//! ```
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if the task panics while holding a lock.

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::error::TaskError;

/// Awaits `fut`, converting a panic into [`TaskError::Panicked`].
pub(crate) async fn guarded<F>(fut: F) -> Result<(), TaskError>
where
    F: Future<Output = Result<(), TaskError>>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(res) => res,
        Err(panic_err) => Err(TaskError::from_panic(&*panic_err)),
    }
}
