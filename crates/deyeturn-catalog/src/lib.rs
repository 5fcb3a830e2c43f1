pub mod traits;
pub mod error;
pub mod query;
pub mod cache;
pub mod images;
pub mod tmdb;

pub use traits::MovieCatalog;
pub use error::CatalogError;
pub use query::{Collection, DiscoverQuery, ListKind, Request, Revalidate, TimeWindow};
pub use cache::RevalidatingCache;
pub use images::{image_url, BACKDROP_SIZE, POSTER_SIZE, PROFILE_SIZE};
pub use tmdb::TmdbClient;
