//! Mock catalog API for browser tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration};

use crate::browser::{ApiError, CatalogApi};
use crate::catalog::{ArtworkRef, GameId, GameRecord, SearchCriteria};

/// Mock implementation of the CatalogApi trait.
///
/// Answers from an in-memory list of records using the same matching rules
/// as the service, and provides controllable behavior for testing:
/// - Per-request response delays, to force out-of-order completions
/// - Recorded search criteria for assertions
/// - Simulated failures
///
/// # Example
///
/// ```rust,ignore
/// use gamecatalog_core::testing::{MockCatalogApi, fixtures};
///
/// let api = MockCatalogApi::with_records(fixtures::sample_catalog());
///
/// // First request answers after 500ms, the second immediately.
/// api.push_delays([Duration::from_millis(500), Duration::ZERO]).await;
/// ```
#[derive(Debug, Default)]
pub struct MockCatalogApi {
    /// Records served by the mock.
    records: Arc<RwLock<Vec<GameRecord>>>,
    /// Delays applied to successive search requests, in issue order.
    delays: Arc<RwLock<VecDeque<Duration>>>,
    /// Recorded search criteria.
    searches: Arc<RwLock<Vec<SearchCriteria>>>,
    /// If set, the next search fails with this status and message.
    next_error: Arc<RwLock<Option<(u16, String)>>>,
}

impl MockCatalogApi {
    /// Create an empty mock API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock API serving `records`.
    pub fn with_records(records: Vec<GameRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            ..Self::default()
        }
    }

    /// Replace the served records.
    pub async fn set_records(&self, records: Vec<GameRecord>) {
        *self.records.write().await = records;
    }

    /// Queue delays for the next search requests, in issue order.
    pub async fn push_delays(&self, delays: impl IntoIterator<Item = Duration>) {
        self.delays.write().await.extend(delays);
    }

    /// Make the next search fail with a server error.
    pub async fn fail_next(&self, status: u16, message: &str) {
        *self.next_error.write().await = Some((status, message.to_string()));
    }

    /// Criteria of every search received so far.
    pub async fn recorded_searches(&self) -> Vec<SearchCriteria> {
        self.searches.read().await.clone()
    }

    /// Number of searches received.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    async fn find(&self, id: GameId) -> Result<GameRecord, ApiError> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(ApiError::NotFound(id))
    }
}

#[async_trait]
impl CatalogApi for MockCatalogApi {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<GameRecord>, ApiError> {
        // Record and pick the delay before suspending so issue order is kept.
        self.searches.write().await.push(criteria.clone());
        let delay = self.delays.write().await.pop_front().unwrap_or_default();
        let error = self.next_error.write().await.take();

        if !delay.is_zero() {
            sleep(delay).await;
        }

        if let Some((status, message)) = error {
            return Err(ApiError::Status { status, message });
        }

        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|record| criteria.matches(record))
            .cloned()
            .collect())
    }

    async fn get(&self, id: GameId) -> Result<GameRecord, ApiError> {
        self.find(id).await
    }

    async fn artwork(&self, id: GameId) -> Result<ArtworkRef, ApiError> {
        let record = self.find(id).await?;
        Ok(ArtworkRef {
            artwork_url: record.artwork_url,
        })
    }
}
