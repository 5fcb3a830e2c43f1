use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Entry {
    stored_at: Instant,
    window: Duration,
    value: Value,
}

impl Entry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < self.window
    }
}

/// In-process response cache. Each entry is served until its revalidation
/// window elapses, then refetched on the next request for the same key.
/// Expired entries are dropped whenever a new response is stored.
#[derive(Debug, Default)]
pub struct RevalidatingCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl RevalidatingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached body for `key` if its window has not elapsed at `now`.
    pub fn get_fresh(&self, key: &str, now: Instant) -> Option<Value> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: impl Into<String>, value: Value, window: Duration, now: Instant) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, entry| entry.is_fresh(now));
        entries.insert(key.into(), Entry { stored_at: now, window, value });
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}
