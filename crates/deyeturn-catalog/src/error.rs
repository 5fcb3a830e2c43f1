use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("No metadata API token configured (set DEYETURN_TMDB_TOKEN or run `deyeturn config token`)")]
    MissingToken,

    #[error("Metadata API returned {status} for {path}")]
    Status { status: u16, path: String },

    #[error("Metadata API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode metadata API response for {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
