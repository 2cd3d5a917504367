//! HTTP client for the catalog query service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::catalog::{ArtworkRef, GameId, GameRecord, SearchCriteria};

/// Errors a browser request can end with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Game not found: {0}")]
    NotFound(GameId),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Read operations the browser needs from the query service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Records matching the active criteria; empty criteria fetch everything.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<GameRecord>, ApiError>;

    /// A single record.
    async fn get(&self, id: GameId) -> Result<GameRecord, ApiError>;

    /// Only the artwork reference of a record.
    async fn artwork(&self, id: GameId) -> Result<ArtworkRef, ApiError>;
}

/// [`CatalogApi`] over HTTP.
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_json<T: DeserializeOwned>(
        response: Response,
        id: Option<GameId>,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(ApiError::NotFound(id));
            }
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<GameRecord>, ApiError> {
        let url = format!("{}/videogames", self.base_url);
        let query: Vec<(&str, &str)> = criteria
            .active()
            .map(|(field, value)| (field.param_name(), value))
            .collect();

        debug!("Catalog search: {:?}", query);

        let response = self.client.get(&url).query(&query).send().await?;
        Self::read_json(response, None).await
    }

    async fn get(&self, id: GameId) -> Result<GameRecord, ApiError> {
        let url = format!("{}/videogames/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response, Some(id)).await
    }

    async fn artwork(&self, id: GameId) -> Result<ArtworkRef, ApiError> {
        let url = format!("{}/videogames/{}/artwork", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response, Some(id)).await
    }
}
