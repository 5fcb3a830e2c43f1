use crate::error::CatalogError;
use crate::query::Request;
use deyeturn_models::Video;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub fn create_tmdb_client() -> Client {
    Client::builder()
        .user_agent(concat!("deyeturn/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Body of `/movie/{id}/videos`.
#[derive(Debug, Deserialize)]
pub(crate) struct VideosResponse {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Perform `request` against `base_url` and return the raw JSON body.
pub async fn fetch_json(
    client: &Client,
    base_url: &str,
    access_token: &str,
    request: &Request,
) -> Result<Value, CatalogError> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), request.path);
    debug!("GET {} {:?}", url, request.params);

    let response = client
        .get(&url)
        .bearer_auth(access_token)
        .header("Accept", "application/json")
        .query(&request.params)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        warn!("Metadata API error: {} - {}. Path: {}", status, error_text, request.path);
        return Err(CatalogError::Status {
            status: status.as_u16(),
            path: request.path.clone(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| CatalogError::Decode {
        path: request.path.clone(),
        source,
    })
}
