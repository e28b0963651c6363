//! Catalog backend client
//!
//! Talks to the streaming backend's REST API:
//! - `GET /api/anime[?q=]` title list, optionally filtered
//! - `GET /api/anime/{id}` single title
//! - `GET /api/anime/{id}/episodes` episode list

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::models::{Episode, Title};

/// Backend used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Catalog API error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Server returned HTTP {0}")]
    Server(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request cancelled")]
    Cancelled,
}

impl CatalogError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CatalogError::Cancelled)
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog backend client
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a client for the default local backend
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BACKEND_URL)
    }

    /// Create a client for a specific backend
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> CatalogResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| CatalogError::InvalidResponse(format!("JSON parse error: {}", e)))
            }
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound),
            status => Err(CatalogError::Server(status.as_u16())),
        }
    }

    /// List catalog titles; an empty query lists everything
    pub async fn list_titles(&self, query: &str) -> CatalogResult<Vec<Title>> {
        let endpoint = if query.is_empty() {
            "/api/anime".to_string()
        } else {
            format!("/api/anime?q={}", urlencoding::encode(query))
        };
        self.get(&endpoint).await
    }

    /// Fetch a single title
    pub async fn title(&self, anime_id: &str) -> CatalogResult<Title> {
        let endpoint = format!("/api/anime/{}", urlencoding::encode(anime_id));
        self.get(&endpoint).await
    }

    /// Fetch the episode list of a title, in backend order
    pub async fn episodes(&self, anime_id: &str) -> CatalogResult<Vec<Episode>> {
        let endpoint = format!("/api/anime/{}/episodes", urlencoding::encode(anime_id));
        self.get(&endpoint).await
    }

    /// Fetch a title and its episodes concurrently.
    ///
    /// Both must succeed: the first failure drops the other request and is
    /// returned, so callers never see half a player page.
    pub async fn title_with_episodes(
        &self,
        anime_id: &str,
    ) -> CatalogResult<(Title, Vec<Episode>)> {
        tokio::try_join!(self.title(anime_id), self.episodes(anime_id))
    }

    /// `list_titles` that resolves to `Cancelled` as soon as `token` fires
    pub async fn list_titles_cancellable(
        &self,
        query: &str,
        token: &CancellationToken,
    ) -> CatalogResult<Vec<Title>> {
        cancellable(token, self.list_titles(query)).await
    }

    /// `title_with_episodes` that resolves to `Cancelled` as soon as `token` fires
    pub async fn title_with_episodes_cancellable(
        &self,
        anime_id: &str,
        token: &CancellationToken,
    ) -> CatalogResult<(Title, Vec<Episode>)> {
        cancellable(token, self.title_with_episodes(anime_id)).await
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Race a request against its cancellation token. An already-cancelled
/// token wins without polling the request.
async fn cancellable<T, F>(token: &CancellationToken, request: F) -> CatalogResult<T>
where
    F: Future<Output = CatalogResult<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(CatalogError::Cancelled),
        result = request => result,
    }
}
