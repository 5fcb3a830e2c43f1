pub mod storage;
pub mod keys;
pub mod codec;
pub mod clock;
pub mod recent;
pub mod preferences;
pub mod watchlist;
pub mod history;
pub mod progress;
pub mod profile;
pub mod playback;

pub use storage::{DetachedStore, FileStore, KeyValueStore, MemoryStore};
pub use keys::{Record, StorageKeys};
pub use codec::Decoded;
pub use clock::{Clock, ManualClock, SystemClock};
pub use recent::RecentList;
pub use preferences::PreferencesStore;
pub use watchlist::WatchlistStore;
pub use history::WatchHistoryStore;
pub use progress::{ContinueWatchingStore, ProgressSink};
pub use profile::Profile;
pub use playback::{format_time, PlaybackSession, PlaybackSettings, PlayerCommand, Subtitle, Tick};
