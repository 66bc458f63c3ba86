//! Scoped implicit wait
//!
//! The driver's implicit wait is session-wide mutable state. Page objects
//! keep it at zero and raise it only for the duration of a single query:
//!
//! ```text
//! RESTING(0) ──open──► ACTIVE(timeout) ──close/drop──► RESTING(0)
//! ```
//!
//! A [`WaitWindow`] holds the session's wait lock for its whole lifetime, so
//! two windows on one session never overlap. Closing resets the wait to zero
//! whether the query succeeded or not; dropping an open window schedules the
//! reset on the current tokio runtime.
//!
//! Windows do not nest. Opening a second window on the same session from
//! inside a [`with_wait`] operation fails with [`PageError::NestedWait`]
//! instead of waiting on a lock its own task holds.

use crate::driver::PageDriver;
use crate::result::{PageError, PageResult};
use crate::session::Session;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

tokio::task_local! {
    /// Sessions with a window held by a [`with_wait`] operation on this task
    static OPEN_WINDOWS: Vec<Uuid>;
}

fn window_open_on(session: Uuid) -> bool {
    OPEN_WINDOWS
        .try_with(|open| open.contains(&session))
        .unwrap_or(false)
}

/// An open implicit-wait window on one session.
///
/// Prefer [`WaitWindow::close`]. Dropping an open window inside a tokio
/// runtime spawns the reset; dropping it outside a runtime cannot reset
/// anything, so the implicit wait stays raised and the session's lock is
/// released. That case is only reported by a `warn!` log line.
#[derive(Debug)]
pub struct WaitWindow<D: PageDriver> {
    driver: Arc<D>,
    session_id: Uuid,
    timeout: Duration,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<D: PageDriver> WaitWindow<D> {
    /// Take the session's wait lock and raise the implicit wait to `timeout`.
    ///
    /// Fails with [`PageError::NestedWait`] when called from a [`with_wait`]
    /// operation on the same session.
    pub async fn open(session: &Session<D>, timeout: Duration) -> PageResult<Self> {
        if window_open_on(session.id()) {
            tracing::warn!(session = %session.id(), "nested wait window refused");
            return Err(PageError::NestedWait {
                session: session.id(),
            });
        }
        let guard = Arc::clone(&session.wait_lock).lock_owned().await;
        let mut window = Self {
            driver: session.shared_driver(),
            session_id: session.id(),
            timeout,
            guard: Some(guard),
        };

        if let Err(err) = window.driver.set_implicit_wait(timeout).await {
            if let Err(reset) = window.driver.set_implicit_wait(Duration::ZERO).await {
                tracing::warn!(
                    session = %window.session_id,
                    error = %reset,
                    "implicit wait reset failed after a failed open"
                );
            }
            let _ = window.guard.take();
            return Err(err);
        }

        tracing::debug!(
            session = %window.session_id,
            timeout_ms = timeout.as_millis() as u64,
            "wait window opened"
        );
        Ok(window)
    }

    /// Timeout this window raised the implicit wait to
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Driver to run the bounded query against
    #[must_use]
    pub fn driver(&self) -> Arc<D> {
        Arc::clone(&self.driver)
    }

    /// Reset the implicit wait to zero and release the lock.
    pub async fn close(mut self) -> PageResult<()> {
        let result = self.driver.set_implicit_wait(Duration::ZERO).await;
        let _ = self.guard.take();
        tracing::debug!(
            session = %self.session_id,
            reset_ok = result.is_ok(),
            "wait window closed"
        );
        result
    }
}

impl<D: PageDriver> Drop for WaitWindow<D> {
    fn drop(&mut self) {
        let Some(guard) = self.guard.take() else {
            return;
        };

        let session = self.session_id;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::warn!(%session, "wait window dropped while open, scheduling reset");
                let driver = Arc::clone(&self.driver);
                let _ = handle.spawn(async move {
                    if let Err(err) = driver.set_implicit_wait(Duration::ZERO).await {
                        tracing::warn!(%session, error = %err, "deferred implicit wait reset failed");
                    }
                    drop(guard);
                });
            }
            Err(_) => {
                tracing::warn!(
                    %session,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "wait window dropped outside a runtime, implicit wait left raised"
                );
            }
        }
    }
}

/// Run one driver query with the implicit wait raised to `timeout`.
///
/// The wait is back at zero before this returns. A query error wins over a
/// reset error; the reset error is logged in that case.
///
/// `op` must not open another window on the same session: a nested
/// `with_wait` (or [`crate::Component::wait_for`]) inside `op` returns
/// [`PageError::NestedWait`]. Tasks spawned by `op` are not tracked.
pub async fn with_wait<D, F, Fut, T>(session: &Session<D>, timeout: Duration, op: F) -> PageResult<T>
where
    D: PageDriver,
    F: FnOnce(Arc<D>) -> Fut,
    Fut: Future<Output = PageResult<T>>,
{
    let window = WaitWindow::open(session, timeout).await?;
    let mut open = OPEN_WINDOWS.try_with(Clone::clone).unwrap_or_default();
    open.push(session.id());
    let result = OPEN_WINDOWS.scope(open, op(window.driver())).await;
    let reset = window.close().await;

    match (result, reset) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(reset_err)) => Err(reset_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(reset_err)) => {
            tracing::warn!(
                session = %session.id(),
                error = %reset_err,
                "implicit wait reset failed after a failed query"
            );
            Err(err)
        }
    }
}

/// [`with_wait`] using the session's default wait.
pub async fn with_default_wait<D, F, Fut, T>(session: &Session<D>, op: F) -> PageResult<T>
where
    D: PageDriver,
    F: FnOnce(Arc<D>) -> Fut,
    Fut: Future<Output = PageResult<T>>,
{
    with_wait(session, session.default_wait(), op).await
}
