use crate::storage::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Outcome of decoding a stored slot. There is no error arm: an absent or
/// malformed slot means "use the default".
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    Value(T),
    UseDefault,
}

impl<T> Decoded<T> {
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(T::default)
    }

    pub fn unwrap_or_else<F: FnOnce() -> T>(self, f: F) -> T {
        match self {
            Decoded::Value(value) => value,
            Decoded::UseDefault => f(),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Decoded::UseDefault)
    }
}

pub fn decode<T: DeserializeOwned>(key: &str, raw: Option<String>) -> Decoded<T> {
    let Some(raw) = raw else {
        debug!("Storage slot {} is empty", key);
        return Decoded::UseDefault;
    };
    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Decoded::Value(value),
        Err(e) => {
            warn!(
                "Storage corruption detected for {}: {}. Falling back to default.",
                key, e
            );
            Decoded::UseDefault
        }
    }
}

/// One namespaced slot of a [`KeyValueStore`], typed at each call.
#[derive(Debug, Clone)]
pub struct Slot<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> Slot<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self { backend, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load<T: DeserializeOwned>(&self) -> Decoded<T> {
        decode(&self.key, self.backend.read(&self.key))
    }

    pub fn store<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.backend.write(&self.key, &json),
            Err(e) => warn!("Failed to serialize {}: {}", self.key, e),
        }
    }

    pub fn clear(&self) {
        self.backend.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_decode_absent_uses_default() {
        let decoded: Decoded<Vec<u64>> = decode("k", None);
        assert!(decoded.is_default());
    }

    #[test]
    fn test_decode_malformed_uses_default() {
        let decoded: Decoded<Vec<u64>> = decode("k", Some("{not json".to_string()));
        assert_eq!(decoded, Decoded::UseDefault);

        // Valid JSON of the wrong shape is just as unusable
        let decoded: Decoded<Vec<u64>> = decode("k", Some(r#"{"a": 1}"#.to_string()));
        assert_eq!(decoded, Decoded::UseDefault);
        assert_eq!(decoded.unwrap_or_default(), Vec::<u64>::new());
    }

    #[test]
    fn test_slot_round_trip() {
        let store = MemoryStore::new();
        let slot = Slot::new(&store, "numbers");
        slot.store(&vec![3u64, 1, 2]);
        assert_eq!(slot.load::<Vec<u64>>(), Decoded::Value(vec![3, 1, 2]));

        slot.clear();
        assert!(slot.load::<Vec<u64>>().is_default());
    }
}
