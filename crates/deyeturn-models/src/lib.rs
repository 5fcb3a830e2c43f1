pub mod catalog;
pub mod continue_watching;
pub mod movie_id;
pub mod preferences;
pub mod watch_history;

pub use catalog::{
    CastMember, Credits, CrewMember, Genre, Movie, MovieDetails, Page, Review, ReviewAuthor, Video, GENRES,
};
pub use continue_watching::ContinueWatchingEntry;
pub use movie_id::{clamp_fraction, MovieId};
pub use preferences::{Preferences, Quality};
pub use watch_history::{NewWatch, WatchHistoryEntry};
