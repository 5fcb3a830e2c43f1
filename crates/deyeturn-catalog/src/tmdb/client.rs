use crate::cache::RevalidatingCache;
use crate::error::CatalogError;
use crate::query::{DiscoverQuery, ListKind, Request};
use crate::tmdb::api;
use crate::traits::MovieCatalog;
use async_trait::async_trait;
use deyeturn_config::CatalogConfig;
use deyeturn_models::{Credits, Movie, MovieDetails, MovieId, Page, Review, Video};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    access_token: Option<String>,
    language: Option<String>,
    cache: Arc<RevalidatingCache>,
}

impl TmdbClient {
    pub fn new(config: &CatalogConfig, access_token: Option<String>) -> Self {
        Self {
            client: Arc::new(api::create_tmdb_client()),
            base_url: config.base_url.clone(),
            access_token: access_token.filter(|t| !t.trim().is_empty()),
            language: config.language.clone(),
            cache: Arc::new(RevalidatingCache::new()),
        }
    }

    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn cache(&self) -> &RevalidatingCache {
        &self.cache
    }

    fn access_token(&self) -> Result<&str, CatalogError> {
        self.access_token.as_deref().ok_or(CatalogError::MissingToken)
    }

    async fn get<T: DeserializeOwned>(&self, request: Request) -> Result<T, CatalogError> {
        let token = self.access_token()?;
        let request = request.with_language(self.language.as_deref());

        let body = match request.revalidate {
            Some(revalidate) => {
                let key = request.cache_key();
                match self.cache.get_fresh(&key, Instant::now()) {
                    Some(cached) => {
                        debug!("Catalog cache hit: {}", key);
                        cached
                    }
                    None => {
                        let fresh = api::fetch_json(&self.client, &self.base_url, token, &request).await?;
                        self.cache.insert(key, fresh.clone(), revalidate.window(), Instant::now());
                        fresh
                    }
                }
            }
            None => api::fetch_json(&self.client, &self.base_url, token, &request).await?,
        };

        serde_json::from_value(body).map_err(|source| CatalogError::Decode {
            path: request.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    fn catalog_name(&self) -> &str {
        "tmdb"
    }

    async fn list(&self, kind: ListKind, page: u32) -> Result<Page<Movie>, CatalogError> {
        self.get(Request::list(kind, page)).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<Page<Movie>, CatalogError> {
        // Blank queries never reach the API
        if query.trim().is_empty() {
            return Ok(Page::empty());
        }
        self.get(Request::search(query, page)).await
    }

    async fn discover(&self, query: &DiscoverQuery) -> Result<Page<Movie>, CatalogError> {
        self.get(Request::discover(query)).await
    }

    async fn details(&self, id: MovieId) -> Result<MovieDetails, CatalogError> {
        self.get(Request::details(id)).await
    }

    async fn credits(&self, id: MovieId) -> Result<Credits, CatalogError> {
        self.get(Request::credits(id)).await
    }

    async fn reviews(&self, id: MovieId, page: u32) -> Result<Page<Review>, CatalogError> {
        self.get(Request::reviews(id, page)).await
    }

    async fn videos(&self, id: MovieId) -> Result<Vec<Video>, CatalogError> {
        let response: api::VideosResponse = self.get(Request::videos(id)).await?;
        Ok(response.results)
    }

    async fn similar(&self, id: MovieId) -> Result<Page<Movie>, CatalogError> {
        self.get(Request::similar(id)).await
    }

    async fn recommendations(&self, id: MovieId) -> Result<Page<Movie>, CatalogError> {
        self.get(Request::recommendations(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Collection, Revalidate};
    use serde_json::{json, Value};

    fn client_with_token() -> TmdbClient {
        TmdbClient::new(&CatalogConfig::default(), Some("test-token".to_string()))
    }

    /// Client whose API calls fail fast, so any response must come from the cache.
    fn offline_client() -> TmdbClient {
        let config = CatalogConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..CatalogConfig::default()
        };
        TmdbClient::new(&config, Some("test-token".to_string()))
    }

    fn prime(client: &TmdbClient, request: Request, body: Value) {
        client
            .cache()
            .insert(request.cache_key(), body, Revalidate::Long.window(), Instant::now());
    }

    #[tokio::test]
    async fn test_missing_token() {
        let client = TmdbClient::new(&CatalogConfig::default(), Some("   ".to_string()));
        assert!(!client.has_token());

        let err = client.list(ListKind::Popular, 1).await.unwrap_err();
        assert!(matches!(err, CatalogError::MissingToken));
    }

    #[tokio::test]
    async fn test_serves_fresh_cache_entry() {
        let client = client_with_token();
        prime(
            &client,
            Request::list(ListKind::Popular, 1),
            json!({
                "page": 1,
                "results": [{"id": 603, "title": "The Matrix", "release_date": "1999-03-30"}],
                "total_pages": 1,
                "total_results": 1
            }),
        );

        let page = client.list(ListKind::Popular, 1).await.unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, MovieId(603));
        assert_eq!(page.results[0].year(), Some(1999));
    }

    #[tokio::test]
    async fn test_videos_and_trailer_from_cache() {
        let client = client_with_token();
        prime(
            &client,
            Request::videos(MovieId(603)),
            json!({
                "id": 603,
                "results": [
                    {"key": "abc", "site": "Vimeo", "type": "Trailer", "name": "Vimeo cut"},
                    {"key": "m8e-FF8MsqU", "site": "YouTube", "type": "Trailer", "name": "Official Trailer"}
                ]
            }),
        );

        let trailer = client.trailer(MovieId(603)).await.unwrap().unwrap();
        assert_eq!(trailer.key, "m8e-FF8MsqU");
    }

    #[tokio::test]
    async fn test_malformed_cached_body_is_decode_error() {
        let client = client_with_token();
        prime(&client, Request::details(MovieId(1)), json!({"id": "nope"}));

        let err = client.details(MovieId(1)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_blank_search_is_empty() {
        let client = client_with_token();
        let page = client.search("  ", 1).await.unwrap();
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn test_search_never_served_from_cache() {
        let client = offline_client();
        prime(
            &client,
            Request::search("matrix", 1),
            json!({"page": 1, "results": [{"id": 1, "title": "Stale"}], "total_pages": 1, "total_results": 1}),
        );

        let err = client.search("matrix", 1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)));
    }

    #[tokio::test]
    async fn test_filtered_discover_never_served_from_cache() {
        let client = offline_client();
        let query = DiscoverQuery { year: Some(1999), ..DiscoverQuery::default() };
        prime(&client, Request::discover(&query), json!({"page": 1, "results": []}));

        assert!(client.discover(&query).await.is_err());
    }

    #[tokio::test]
    async fn test_collection_credits_and_reviews_from_cache() {
        let client = offline_client();
        prime(
            &client,
            Request::list(ListKind::Collection(Collection::Classics), 1),
            json!({"page": 1, "results": [{"id": 389, "title": "12 Angry Men"}], "total_pages": 5}),
        );
        prime(
            &client,
            Request::credits(MovieId(389)),
            json!({"id": 389, "cast": [{"id": 4020, "name": "Henry Fonda", "character": "Juror 8", "order": 0}]}),
        );
        prime(
            &client,
            Request::reviews(MovieId(389), 1),
            json!({"page": 1, "results": [{"id": "r1", "author": "critic", "content": "Tense."}], "total_pages": 1}),
        );

        let classics = client.collection(Collection::Classics, 1).await.unwrap();
        assert_eq!(classics.results[0].title, "12 Angry Men");
        assert!(classics.has_next());

        let credits = client.credits(MovieId(389)).await.unwrap();
        assert_eq!(credits.cast[0].character, "Juror 8");

        let reviews = client.reviews(MovieId(389), 1).await.unwrap();
        assert_eq!(reviews.results[0].byline(), "critic");
    }
}
