use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::movie_id::MovieId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryEntry {
    pub movie_id: MovieId,
    pub title: String,
    pub thumbnail: String, // Poster/backdrop path as returned by the metadata API
    pub watched_at: DateTime<Utc>,
    pub progress: f64, // Fraction of runtime, 0.0..=1.0
}

/// A watch event before the store stamps it with `watched_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWatch {
    pub movie_id: MovieId,
    pub title: String,
    pub thumbnail: String,
    pub progress: f64,
}

impl NewWatch {
    pub fn stamped(self, watched_at: DateTime<Utc>) -> WatchHistoryEntry {
        WatchHistoryEntry {
            movie_id: self.movie_id,
            title: self.title,
            thumbnail: self.thumbnail,
            watched_at,
            progress: crate::clamp_fraction(self.progress),
        }
    }
}
