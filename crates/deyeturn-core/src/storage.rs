use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Raw key-value port underneath every typed store.
///
/// Implementations never fail toward the caller: a slot that cannot be read is
/// absent, a write that cannot be performed is dropped.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Ephemeral in-process storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave a half-written String behind
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.slots().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.slots().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.slots().remove(key);
    }
}

/// Storage for contexts that have none: reads are absent, writes are no-ops.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedStore;

impl KeyValueStore for DetachedStore {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, key: &str, _value: &str) {
        debug!("Storage detached, dropping write to {}", key);
    }

    fn remove(&self, _key: &str) {}
}

/// Durable storage: one `<key>.json` document per key inside a profile directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Option<PathBuf> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            warn!("Rejecting storage key {:?}: not a plain file name", key);
            return None;
        }
        Some(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.slot_path(key)?;
        if !path.exists() {
            debug!("Storage miss: {} (file does not exist)", key);
            return None;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Failed to read storage file for {}: {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        let Some(path) = self.slot_path(key) else {
            return;
        };
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            warn!("Failed to create storage directory {:?}: {}", self.dir, e);
            return;
        }

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        let result = std::fs::write(&temp_path, value)
            .and_then(|_| std::fs::rename(&temp_path, &path));
        match result {
            Ok(()) => debug!("Storage saved: {} ({} bytes)", key, value.len()),
            Err(e) => {
                warn!("Failed to write storage file for {}: {}", key, e);
                let _ = std::fs::remove_file(&temp_path);
            }
        }
    }

    fn remove(&self, key: &str) {
        let Some(path) = self.slot_path(key) else {
            return;
        };
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("Failed to remove storage file for {}: {}", key, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_read_write_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.read("a"), None);

        store.write("a", "[1]");
        assert_eq!(store.read("a").as_deref(), Some("[1]"));

        store.write("a", "[2]");
        assert_eq!(store.read("a").as_deref(), Some("[2]"));

        store.remove("a");
        assert_eq!(store.read("a"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_detached_store_ignores_everything() {
        let store = DetachedStore;
        store.write("a", "[1]");
        assert_eq!(store.read("a"), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        store.write("deyeturn_my_list", "[42]");

        let reopened = FileStore::new(dir.path()).unwrap();
        assert_eq!(reopened.read("deyeturn_my_list").as_deref(), Some("[42]"));
        assert!(dir.path().join("deyeturn_my_list.json").exists());
        assert!(!dir.path().join("deyeturn_my_list.json.tmp").exists());

        reopened.remove("deyeturn_my_list");
        assert_eq!(store.read("deyeturn_my_list"), None);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(&dir.path().join("storage")).unwrap();
        store.write("../escape", "x");
        assert_eq!(store.read("../escape"), None);
        assert!(!dir.path().join("escape.json").exists());
    }

    #[test]
    fn test_file_store_unreadable_slot_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        // A directory where the document should be cannot be read as a string
        std::fs::create_dir(dir.path().join("deyeturn_watch_history.json")).unwrap();
        assert_eq!(store.read("deyeturn_watch_history"), None);
    }

    #[test]
    fn test_shared_backend_through_arc() {
        let store = Arc::new(MemoryStore::new());
        let a = Arc::clone(&store);
        let b = &*store;
        a.write("k", "v");
        assert_eq!(b.read("k").as_deref(), Some("v"));
    }
}
