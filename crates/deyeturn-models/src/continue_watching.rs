use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::movie_id::MovieId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContinueWatchingEntry {
    pub movie_id: MovieId,
    pub progress: f64,
    pub updated_at: DateTime<Utc>,
}
