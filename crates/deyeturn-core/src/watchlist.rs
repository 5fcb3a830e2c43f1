use crate::codec::Slot;
use crate::storage::KeyValueStore;
use deyeturn_models::MovieId;
use tracing::debug;

/// "My List": a set of movie ids kept in insertion order.
#[derive(Debug, Clone)]
pub struct WatchlistStore<S> {
    slot: Slot<S>,
}

impl<S: KeyValueStore> WatchlistStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self { slot: Slot::new(backend, key) }
    }

    pub fn get_watchlist(&self) -> Vec<MovieId> {
        self.slot.load().unwrap_or_default()
    }

    pub fn is_in_watchlist(&self, id: MovieId) -> bool {
        self.get_watchlist().contains(&id)
    }

    pub fn add_to_watchlist(&self, id: MovieId) {
        let mut list = self.get_watchlist();
        if list.contains(&id) {
            return;
        }
        list.push(id);
        self.slot.store(&list);
        debug!("Added {} to watchlist ({} items)", id, list.len());
    }

    pub fn remove_from_watchlist(&self, id: MovieId) {
        let mut list = self.get_watchlist();
        list.retain(|existing| *existing != id);
        self.slot.store(&list);
        debug!("Removed {} from watchlist ({} items)", id, list.len());
    }

    /// Flip membership of `id`; returns whether it is in the list afterwards.
    pub fn toggle_watchlist(&self, id: MovieId) -> bool {
        if self.is_in_watchlist(id) {
            self.remove_from_watchlist(id);
            false
        } else {
            self.add_to_watchlist(id);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const KEY: &str = "deyeturn_my_list";

    fn store() -> WatchlistStore<MemoryStore> {
        WatchlistStore::new(MemoryStore::new(), KEY)
    }

    #[test]
    fn test_add_is_idempotent() {
        let store = store();
        store.add_to_watchlist(MovieId(42));
        store.add_to_watchlist(MovieId(42));
        assert_eq!(store.get_watchlist(), vec![MovieId(42)]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let store = store();
        for id in [5, 1, 9] {
            store.add_to_watchlist(MovieId(id));
        }
        assert_eq!(store.get_watchlist(), vec![MovieId(5), MovieId(1), MovieId(9)]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let store = store();
        store.add_to_watchlist(MovieId(1));
        store.remove_from_watchlist(MovieId(2));
        store.remove_from_watchlist(MovieId(2));
        assert_eq!(store.get_watchlist(), vec![MovieId(1)]);
    }

    #[test]
    fn test_membership_tracks_net_effect() {
        let store = store();
        let ops: [(bool, u64); 8] = [
            (true, 1),
            (true, 2),
            (false, 1),
            (true, 3),
            (false, 1),
            (true, 1),
            (false, 3),
            (true, 2),
        ];
        let mut expected = std::collections::BTreeSet::new();
        for (add, id) in ops {
            if add {
                store.add_to_watchlist(MovieId(id));
                expected.insert(id);
            } else {
                store.remove_from_watchlist(MovieId(id));
                expected.remove(&id);
            }
            for probe in 1..=3 {
                assert_eq!(store.is_in_watchlist(MovieId(probe)), expected.contains(&probe));
            }
        }
        assert_eq!(store.get_watchlist(), vec![MovieId(2), MovieId(1)]);
    }

    #[test]
    fn test_toggle() {
        let store = store();
        assert!(store.toggle_watchlist(MovieId(7)));
        assert!(store.is_in_watchlist(MovieId(7)));
        assert!(!store.toggle_watchlist(MovieId(7)));
        assert!(store.get_watchlist().is_empty());
    }

    #[test]
    fn test_corrupt_list_reads_empty() {
        let backend = MemoryStore::new();
        backend.write(KEY, "[1, 2,");
        let store = WatchlistStore::new(&backend, KEY);
        assert!(store.get_watchlist().is_empty());
        assert!(!store.is_in_watchlist(MovieId(1)));

        store.add_to_watchlist(MovieId(3));
        assert_eq!(backend.read(KEY).as_deref(), Some("[3]"));
    }
}
