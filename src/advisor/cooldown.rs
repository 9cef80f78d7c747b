//! Quota cooldown window
//!
//! After a quota error the proxy stops calling the remote service until the
//! window has passed. Uses tokio's clock so tests can pause and advance time.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug)]
pub struct Cooldown {
    window: Duration,
    until: Mutex<Option<Instant>>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            until: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Instant>> {
        self.until.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Time left before remote calls may resume, if any
    pub fn remaining(&self) -> Option<Duration> {
        let until = (*self.lock())?;
        let now = Instant::now();
        (now < until).then(|| until - now)
    }

    pub fn is_active(&self) -> bool {
        self.remaining().is_some()
    }

    /// Start a fresh window from now and return its deadline
    pub fn trip(&self) -> Instant {
        let deadline = Instant::now() + self.window;
        *self.lock() = Some(deadline);
        deadline
    }
}
