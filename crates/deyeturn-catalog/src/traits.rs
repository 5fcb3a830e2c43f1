use crate::error::CatalogError;
use crate::query::{Collection, DiscoverQuery, ListKind};
use async_trait::async_trait;
use deyeturn_models::{Credits, Movie, MovieDetails, MovieId, Page, Review, Video};

/// Read-only movie metadata source behind the browse, detail and watch views.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    fn catalog_name(&self) -> &str;

    async fn list(&self, kind: ListKind, page: u32) -> Result<Page<Movie>, CatalogError>;
    async fn search(&self, query: &str, page: u32) -> Result<Page<Movie>, CatalogError>;
    async fn discover(&self, query: &DiscoverQuery) -> Result<Page<Movie>, CatalogError>;

    async fn details(&self, id: MovieId) -> Result<MovieDetails, CatalogError>;
    async fn credits(&self, id: MovieId) -> Result<Credits, CatalogError>;
    async fn reviews(&self, id: MovieId, page: u32) -> Result<Page<Review>, CatalogError>;
    async fn videos(&self, id: MovieId) -> Result<Vec<Video>, CatalogError>;
    async fn similar(&self, id: MovieId) -> Result<Page<Movie>, CatalogError>;
    async fn recommendations(&self, id: MovieId) -> Result<Page<Movie>, CatalogError>;

    /// Movies of a single genre, most popular first.
    async fn by_genre(&self, genre_id: u32, page: u32) -> Result<Page<Movie>, CatalogError> {
        let query = DiscoverQuery {
            page,
            genres: vec![genre_id],
            ..DiscoverQuery::default()
        };
        self.discover(&query).await
    }

    /// A curated home-screen row.
    async fn collection(&self, collection: Collection, page: u32) -> Result<Page<Movie>, CatalogError> {
        self.list(ListKind::Collection(collection), page).await
    }

    /// First YouTube trailer for the movie, if any.
    async fn trailer(&self, id: MovieId) -> Result<Option<Video>, CatalogError> {
        let videos = self.videos(id).await?;
        Ok(videos.into_iter().find(|v| v.is_youtube_trailer()))
    }
}
