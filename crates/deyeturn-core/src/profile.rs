use crate::clock::{Clock, SystemClock};
use crate::history::WatchHistoryStore;
use crate::keys::{Record, StorageKeys};
use crate::preferences::PreferencesStore;
use crate::progress::ContinueWatchingStore;
use crate::storage::{FileStore, KeyValueStore};
use crate::watchlist::WatchlistStore;
use anyhow::Result;
use deyeturn_config::{PathManager, StorageConfig};
use std::sync::Arc;
use tracing::info;

/// The four typed stores of one profile, sharing a single backend.
#[derive(Debug)]
pub struct Profile<S, C = SystemClock> {
    backend: Arc<S>,
    keys: StorageKeys,
    preferences: PreferencesStore<Arc<S>>,
    watchlist: WatchlistStore<Arc<S>>,
    history: WatchHistoryStore<Arc<S>, Arc<C>>,
    progress: ContinueWatchingStore<Arc<S>, Arc<C>>,
}

impl Profile<FileStore> {
    /// Open the file-backed profile under `paths`.
    pub fn open(paths: &PathManager, config: &StorageConfig) -> Result<Self> {
        let backend = FileStore::new(&paths.storage_dir())?;
        info!("Opened profile storage at {:?}", backend.dir());
        Ok(Self::new(backend, config))
    }
}

impl<S: KeyValueStore> Profile<S> {
    pub fn new(backend: S, config: &StorageConfig) -> Self {
        Self::with_clock(backend, config, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> Profile<S, C> {
    pub fn with_clock(backend: S, config: &StorageConfig, clock: C) -> Self {
        let backend = Arc::new(backend);
        let clock = Arc::new(clock);
        let keys = StorageKeys::new(config.namespace.clone());
        Self {
            preferences: PreferencesStore::new(Arc::clone(&backend), keys.key_for(Record::Preferences)),
            watchlist: WatchlistStore::new(Arc::clone(&backend), keys.key_for(Record::Watchlist)),
            history: WatchHistoryStore::with_clock(
                Arc::clone(&backend),
                keys.key_for(Record::WatchHistory),
                config.history_capacity,
                Arc::clone(&clock),
            ),
            progress: ContinueWatchingStore::with_clock(
                Arc::clone(&backend),
                keys.key_for(Record::ContinueWatching),
                config.continue_watching_capacity,
                clock,
            ),
            backend,
            keys,
        }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn preferences(&self) -> &PreferencesStore<Arc<S>> {
        &self.preferences
    }

    pub fn watchlist(&self) -> &WatchlistStore<Arc<S>> {
        &self.watchlist
    }

    pub fn history(&self) -> &WatchHistoryStore<Arc<S>, Arc<C>> {
        &self.history
    }

    pub fn progress(&self) -> &ContinueWatchingStore<Arc<S>, Arc<C>> {
        &self.progress
    }

    /// Drop a record entirely; the next read sees the default/empty state.
    pub fn clear(&self, record: Record) {
        let key = self.keys.key_for(record);
        self.backend.remove(&key);
        info!("Cleared {}", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DetachedStore, MemoryStore};
    use deyeturn_models::{MovieId, NewWatch, Preferences, Quality};
    use tempfile::TempDir;

    #[test]
    fn test_stores_use_distinct_keys() {
        let profile = Profile::new(MemoryStore::new(), &StorageConfig::default());
        profile.watchlist().add_to_watchlist(MovieId(42));
        profile.progress().update_progress(MovieId(42), 0.5);

        assert_eq!(profile.watchlist().get_watchlist(), vec![MovieId(42)]);
        assert!(profile.history().get_history().is_empty());
        assert_eq!(profile.preferences().get_preferences(), Preferences::default());
    }

    #[test]
    fn test_clear_single_record() {
        let profile = Profile::new(MemoryStore::new(), &StorageConfig::default());
        profile.watchlist().add_to_watchlist(MovieId(1));
        profile.progress().update_progress(MovieId(1), 0.4);

        profile.clear(Record::Watchlist);
        assert!(profile.watchlist().get_watchlist().is_empty());
        assert_eq!(profile.progress().get_progress(MovieId(1)), 0.4);
    }

    #[test]
    fn test_configured_capacities_apply() {
        let config = StorageConfig {
            history_capacity: 2,
            continue_watching_capacity: 1,
            ..StorageConfig::default()
        };
        let profile = Profile::new(MemoryStore::new(), &config);
        for id in 1..=3 {
            profile.history().record_watch(NewWatch {
                movie_id: MovieId(id),
                title: String::new(),
                thumbnail: String::new(),
                progress: 0.0,
            });
            profile.progress().update_progress(MovieId(id), 0.5);
        }
        assert_eq!(profile.history().get_history().len(), 2);
        assert_eq!(profile.progress().get_continue_watching().len(), 1);
    }

    #[test]
    fn test_file_profile_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        let config = StorageConfig::default();

        let profile = Profile::open(&paths, &config).unwrap();
        let prefs = Preferences { preferred_quality: Quality::P480, ..Preferences::default() };
        profile.preferences().save_preferences(&prefs);
        profile.watchlist().add_to_watchlist(MovieId(550));
        drop(profile);

        let reopened = Profile::open(&paths, &config).unwrap();
        assert_eq!(reopened.preferences().get_preferences(), prefs);
        assert!(reopened.watchlist().is_in_watchlist(MovieId(550)));
        assert!(paths.storage_dir().join("deyeturn_my_list.json").exists());
    }

    #[test]
    fn test_namespaces_isolate_profiles() {
        let backend = Arc::new(MemoryStore::new());
        let adults = Profile::new(Arc::clone(&backend), &StorageConfig::default());
        let kids = Profile::new(
            Arc::clone(&backend),
            &StorageConfig { namespace: "kids".to_string(), ..StorageConfig::default() },
        );
        adults.watchlist().add_to_watchlist(MovieId(1));
        assert!(kids.watchlist().get_watchlist().is_empty());
    }

    #[test]
    fn test_detached_profile_is_always_empty() {
        let profile = Profile::new(DetachedStore, &StorageConfig::default());
        profile.watchlist().add_to_watchlist(MovieId(1));
        profile.progress().update_progress(MovieId(1), 0.5);
        assert!(profile.watchlist().get_watchlist().is_empty());
        assert_eq!(profile.progress().get_progress(MovieId(1)), 0.0);
    }
}
