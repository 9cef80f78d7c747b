//! In-flight request registry
//!
//! Concurrent callers asking for the same key share one in-progress call
//! instead of each starting their own. The work runs as its own tokio task, so
//! it finishes and leaves the registry even when every caller has given up.
//! Later callers for the key then start afresh.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use thiserror::Error;

/// The shared task ended without a value (it panicked or its runtime shut down)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("In-flight call aborted: {0}")]
pub struct FlightAborted(pub String);

/// A handle every waiter on the same key can await
pub type Flight<T> = Shared<BoxFuture<'static, Result<T, FlightAborted>>>;

/// Whether the caller started the flight or joined an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Leader,
    Follower,
}

pub struct SingleFlight<T> {
    calls: Mutex<HashMap<String, Flight<T>>>,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> SingleFlight<T> {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Flight<T>>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of flights currently outstanding
    pub fn in_flight(&self) -> usize {
        self.lock().len()
    }
}

/// Removes a key from the registry when the task owning it ends, however it ends
struct Deregister<T> {
    registry: Arc<SingleFlight<T>>,
    key: String,
}

impl<T> Drop for Deregister<T> {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.key);
    }
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the flight for `key`, or spawn one with `start`
    ///
    /// `start` is only invoked when no flight exists for `key`. Must be called
    /// from within a tokio runtime.
    pub fn join_or_start<F, Fut>(self: &Arc<Self>, key: String, start: F) -> (Flight<T>, Role)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let mut calls = self.lock();
        if let Some(flight) = calls.get(&key) {
            return (flight.clone(), Role::Follower);
        }

        let registry = Arc::clone(self);
        let done_key = key.clone();
        let work = start();
        // The guard is built on first poll, after the lock above is released.
        let task = tokio::spawn(async move {
            let _deregister = Deregister {
                registry,
                key: done_key,
            };
            work.await
        });

        let flight = async move { task.await.map_err(|e| FlightAborted(e.to_string())) }
            .boxed()
            .shared();

        calls.insert(key, flight.clone());
        (flight, Role::Leader)
    }
}

#[cfg(test)]
#[path = "single_flight_tests.rs"]
mod single_flight_tests;
