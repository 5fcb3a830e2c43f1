use crate::codec::Slot;
use crate::storage::KeyValueStore;
use deyeturn_models::Preferences;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PreferencesStore<S> {
    slot: Slot<S>,
}

impl<S: KeyValueStore> PreferencesStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self { slot: Slot::new(backend, key) }
    }

    /// Stored preferences, or the defaults when nothing usable is stored.
    pub fn get_preferences(&self) -> Preferences {
        self.slot.load().unwrap_or_default()
    }

    /// Replace the stored record wholesale.
    pub fn save_preferences(&self, preferences: &Preferences) {
        self.slot.store(preferences);
        debug!("Saved preferences to {}", self.slot.key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DetachedStore, MemoryStore};
    use deyeturn_models::Quality;

    const KEY: &str = "deyeturn_user_preferences";

    #[test]
    fn test_defaults_when_absent() {
        let store = PreferencesStore::new(MemoryStore::new(), KEY);
        assert_eq!(store.get_preferences(), Preferences::default());
    }

    #[test]
    fn test_save_then_get_round_trips() {
        let store = PreferencesStore::new(MemoryStore::new(), KEY);
        for quality in Quality::ALL {
            let prefs = Preferences {
                dark_mode: false,
                auto_play: quality == Quality::Auto,
                preferred_quality: quality,
                notifications: false,
            };
            store.save_preferences(&prefs);
            assert_eq!(store.get_preferences(), prefs);
        }
    }

    #[test]
    fn test_corrupt_record_yields_defaults() {
        let backend = MemoryStore::new();
        backend.write(KEY, "{\"darkMode\": tru");
        let store = PreferencesStore::new(&backend, KEY);
        assert_eq!(store.get_preferences(), Preferences::default());

        // Next save overwrites the corrupt slot wholesale
        let prefs = Preferences { dark_mode: false, ..Preferences::default() };
        store.save_preferences(&prefs);
        assert_eq!(store.get_preferences(), prefs);
    }

    #[test]
    fn test_unknown_quality_yields_defaults() {
        let backend = MemoryStore::new();
        backend.write(
            KEY,
            r#"{"darkMode":false,"autoPlay":false,"preferredQuality":"4k","notifications":false}"#,
        );
        let store = PreferencesStore::new(&backend, KEY);
        assert_eq!(store.get_preferences(), Preferences::default());
    }

    #[test]
    fn test_detached_storage_never_persists() {
        let store = PreferencesStore::new(DetachedStore, KEY);
        store.save_preferences(&Preferences { dark_mode: false, ..Preferences::default() });
        assert_eq!(store.get_preferences(), Preferences::default());
    }
}
