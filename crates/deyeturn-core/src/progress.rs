use crate::clock::{Clock, SystemClock};
use crate::codec::Slot;
use crate::recent::RecentList;
use crate::storage::KeyValueStore;
use deyeturn_models::{clamp_fraction, ContinueWatchingEntry, MovieId};
use tracing::debug;

pub const DEFAULT_CONTINUE_WATCHING_CAPACITY: usize = 10;

/// Where a playback session reads and writes per-movie progress.
pub trait ProgressSink {
    fn get_progress(&self, id: MovieId) -> f64;
    fn update_progress(&self, id: MovieId, progress: f64);
}

impl<P: ProgressSink + ?Sized> ProgressSink for &P {
    fn get_progress(&self, id: MovieId) -> f64 {
        (**self).get_progress(id)
    }

    fn update_progress(&self, id: MovieId, progress: f64) {
        (**self).update_progress(id, progress)
    }
}

/// Continue-watching progress, most recently updated first.
///
/// Entries that fall out of the window are gone for good: their progress
/// reads back as 0, exactly like a movie that was never played.
#[derive(Debug, Clone)]
pub struct ContinueWatchingStore<S, C = SystemClock> {
    slot: Slot<S>,
    capacity: usize,
    clock: C,
}

impl<S: KeyValueStore> ContinueWatchingStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self::with_clock(backend, key, DEFAULT_CONTINUE_WATCHING_CAPACITY, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> ContinueWatchingStore<S, C> {
    pub fn with_clock(backend: S, key: impl Into<String>, capacity: usize, clock: C) -> Self {
        Self {
            slot: Slot::new(backend, key),
            capacity,
            clock,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get_continue_watching(&self) -> Vec<ContinueWatchingEntry> {
        RecentList::from_vec(self.slot.load().unwrap_or_default(), self.capacity).into_vec()
    }

    pub fn get_progress(&self, id: MovieId) -> f64 {
        self.get_continue_watching()
            .into_iter()
            .find(|entry| entry.movie_id == id)
            .map(|entry| entry.progress)
            .unwrap_or(0.0)
    }

    pub fn update_progress(&self, id: MovieId, progress: f64) {
        let progress = clamp_fraction(progress);
        let now = self.clock.now();
        // Read without truncating: the entry being updated may sit past the bound
        let stored: Vec<ContinueWatchingEntry> = self.slot.load().unwrap_or_default();
        let mut list = RecentList::new(self.capacity);
        let evicted = list.mutate(|items| {
            *items = stored;
            match items.iter_mut().find(|entry| entry.movie_id == id) {
                Some(existing) => {
                    existing.progress = progress;
                    existing.updated_at = now;
                }
                None => items.push(ContinueWatchingEntry {
                    movie_id: id,
                    progress,
                    updated_at: now,
                }),
            }
            // Stable: entries with equal timestamps keep their relative order
            items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        });
        for dropped in &evicted {
            debug!("Continue watching full, evicting {}", dropped.movie_id);
        }
        self.slot.store(list.as_slice());
    }
}

impl<S: KeyValueStore, C: Clock> ProgressSink for ContinueWatchingStore<S, C> {
    fn get_progress(&self, id: MovieId) -> f64 {
        ContinueWatchingStore::get_progress(self, id)
    }

    fn update_progress(&self, id: MovieId, progress: f64) {
        ContinueWatchingStore::update_progress(self, id, progress)
    }
}
