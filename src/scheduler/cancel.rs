//! Cancellation signal for background loops
//!
//! The token is set once and observed between iterations. Waiting on it
//! doubles as the loop's delay, so a cancelled loop wakes up right away
//! instead of sleeping out the rest of its interval.

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Shared, clonable cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancellationToken {
    /// Create a token that hasn't been cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake every waiter
    pub fn cancel(&self) {
        let (flag, condvar) = &*self.inner;
        *flag.lock().unwrap_or_else(|e| e.into_inner()) = true;
        condvar.notify_all();
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Wait up to `timeout` for cancellation
    ///
    /// Returns `true` if the token was cancelled before the timeout ran out.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (flag, condvar) = &*self.inner;
        let deadline = Instant::now() + timeout;
        let mut cancelled = flag.lock().unwrap_or_else(|e| e.into_inner());

        while !*cancelled {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            cancelled = condvar
                .wait_timeout(cancelled, deadline - now)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|e| e.into_inner().0);
        }

        true
    }
}
