//! Response cache
//!
//! Maps a normalized request key to a successful remote payload for the
//! lifetime of the proxy. Unbounded unless a capacity is given, in which case
//! the oldest insertion is evicted first.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Build a cache key from request parts: trimmed, lowercased, `|`-joined
pub fn normalize_key(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join("|")
}

#[derive(Debug)]
struct Entries<T> {
    values: HashMap<String, T>,
    order: VecDeque<String>,
}

#[derive(Debug)]
pub struct ResponseCache<T> {
    entries: Mutex<Entries<T>>,
    capacity: Option<usize>,
}

impl<T: Clone> ResponseCache<T> {
    /// `capacity` of `None` keeps everything; `Some(0)` disables caching
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(Entries {
                values: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries<T>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.lock().values.get(key).cloned()
    }

    pub fn insert(&self, key: String, value: T) {
        if self.capacity == Some(0) {
            return;
        }

        let mut entries = self.lock();
        if entries.values.insert(key.clone(), value).is_none() {
            entries.order.push_back(key);
        }

        if let Some(capacity) = self.capacity {
            while entries.values.len() > capacity {
                let Some(oldest) = entries.order.pop_front() else {
                    break;
                };
                entries.values.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
