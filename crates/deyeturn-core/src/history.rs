use crate::clock::{Clock, SystemClock};
use crate::codec::Slot;
use crate::recent::RecentList;
use crate::storage::KeyValueStore;
use deyeturn_models::{NewWatch, WatchHistoryEntry};
use tracing::debug;

pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Most-recent-first log of watched movies, one entry per movie.
#[derive(Debug, Clone)]
pub struct WatchHistoryStore<S, C = SystemClock> {
    slot: Slot<S>,
    capacity: usize,
    clock: C,
}

impl<S: KeyValueStore> WatchHistoryStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self::with_clock(backend, key, DEFAULT_HISTORY_CAPACITY, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> WatchHistoryStore<S, C> {
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

    fn load(&self) -> RecentList<WatchHistoryEntry> {
        RecentList::from_vec(self.slot.load().unwrap_or_default(), self.capacity)
    }

    pub fn get_history(&self) -> Vec<WatchHistoryEntry> {
        self.load().into_vec()
    }

    /// Stamp `watch` with the current time and move it to the front of the log.
    pub fn record_watch(&self, watch: NewWatch) -> WatchHistoryEntry {
        let entry = watch.stamped(self.clock.now());
        let mut history = self.load();
        let evicted = history.push_front_unique(entry.clone(), |a, b| a.movie_id == b.movie_id);
        for dropped in &evicted {
            debug!("Watch history full, dropping {} ({})", dropped.movie_id, dropped.title);
        }
        self.slot.store(history.as_slice());
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};
    use deyeturn_models::MovieId;

    const KEY: &str = "deyeturn_watch_history";

    fn watch(id: u64, progress: f64) -> NewWatch {
        NewWatch {
            movie_id: MovieId(id),
            title: format!("Movie {}", id),
            thumbnail: format!("/poster{}.jpg", id),
            progress,
        }
    }

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap())
    }

    #[test]
    fn test_empty_when_absent() {
        let store = WatchHistoryStore::new(MemoryStore::new(), KEY);
        assert!(store.get_history().is_empty());
    }

    #[test]
    fn test_record_stamps_current_time() {
        let clock = clock();
        let store = WatchHistoryStore::with_clock(MemoryStore::new(), KEY, 20, &clock);
        let entry = store.record_watch(watch(1, 0.5));
        assert_eq!(entry.watched_at, clock.now());
        assert_eq!(store.get_history(), vec![entry]);
    }

    #[test]
    fn test_rerecord_replaces_and_moves_to_front() {
        let clock = clock();
        let store = WatchHistoryStore::with_clock(MemoryStore::new(), KEY, 20, &clock);
        store.record_watch(watch(1, 0.1));
        clock.advance(Duration::minutes(1));
        store.record_watch(watch(2, 0.2));
        clock.advance(Duration::minutes(1));
        store.record_watch(watch(1, 0.8));

        let history = store.get_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].movie_id, MovieId(1));
        assert_eq!(history[0].progress, 0.8);
        assert_eq!(history[1].movie_id, MovieId(2));
    }

    #[test]
    fn test_bounded_to_capacity_dropping_oldest() {
        let clock = clock();
        let store = WatchHistoryStore::with_clock(MemoryStore::new(), KEY, 20, &clock);
        for id in 1..=20 {
            store.record_watch(watch(id, 0.5));
            clock.advance(Duration::seconds(30));
        }
        assert_eq!(store.get_history().len(), 20);

        store.record_watch(watch(21, 0.5));
        let history = store.get_history();
        assert_eq!(history.len(), 20);
        assert_eq!(history[0].movie_id, MovieId(21));
        assert!(history.iter().all(|e| e.movie_id != MovieId(1)));
        assert_eq!(history[19].movie_id, MovieId(2));
    }

    #[test]
    fn test_progress_is_clamped() {
        let store = WatchHistoryStore::new(MemoryStore::new(), KEY);
        assert_eq!(store.record_watch(watch(3, 1.7)).progress, 1.0);
    }

    #[test]
    fn test_corrupt_history_reads_empty_and_is_overwritten() {
        let backend = MemoryStore::new();
        backend.write(KEY, "not json at all");
        let store = WatchHistoryStore::new(&backend, KEY);
        assert!(store.get_history().is_empty());

        store.record_watch(watch(9, 0.25));
        assert_eq!(store.get_history().len(), 1);
    }

    #[test]
    fn test_reads_existing_wire_format() {
        let backend = MemoryStore::new();
        backend.write(
            KEY,
            r#"[{"movieId":603,"title":"The Matrix","thumbnail":"/m.jpg","watchedAt":"2024-04-30T18:22:05.123Z","progress":0.4}]"#,
        );
        let store = WatchHistoryStore::new(&backend, KEY);
        let history = store.get_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].movie_id, MovieId(603));
        assert_eq!(history[0].title, "The Matrix");
    }
}
