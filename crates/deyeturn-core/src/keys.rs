/// The four record types kept per profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Record {
    Preferences,
    WatchHistory,
    Watchlist,
    ContinueWatching,
}

impl Record {
    pub const ALL: [Record; 4] = [
        Record::Preferences,
        Record::WatchHistory,
        Record::Watchlist,
        Record::ContinueWatching,
    ];

    fn suffix(self) -> &'static str {
        match self {
            Record::Preferences => "user_preferences",
            Record::WatchHistory => "watch_history",
            Record::Watchlist => "my_list",
            Record::ContinueWatching => "continue_watching",
        }
    }
}

/// Namespaced storage keys. The suffixes are part of the on-disk format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    namespace: String,
}

impl StorageKeys {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self { namespace: namespace.into() }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key_for(&self, record: Record) -> String {
        format!("{}_{}", self.namespace, record.suffix())
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new("deyeturn")
    }
}
