//! Mock game catalog for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use crate::catalog::{
    ArtworkRef, CatalogError, GameCatalog, GameId, GameRecord, SearchCriteria,
};

/// A recorded catalog call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCatalogCall {
    Search(SearchCriteria),
    Get(GameId),
    Artwork(GameId),
    Count,
}

/// Mock implementation of the GameCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Serve a configurable list of records
/// - Track calls for assertions
/// - Simulate store failures, once or until reset
///
/// # Example
///
/// ```rust,ignore
/// use gamecatalog_core::testing::{MockGameCatalog, fixtures};
///
/// let catalog = MockGameCatalog::with_records(fixtures::sample_catalog());
/// catalog.set_unavailable(true);
///
/// assert!(catalog.search(&SearchCriteria::new()).is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockGameCatalog {
    /// Records served by the mock.
    records: RwLock<Vec<GameRecord>>,
    /// Recorded calls.
    calls: Mutex<Vec<RecordedCatalogCall>>,
    /// If set, the next call fails with this error.
    next_error: Mutex<Option<CatalogError>>,
    /// When true, every call fails with a database error.
    unavailable: AtomicBool,
}

impl MockGameCatalog {
    /// Create an empty mock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock catalog serving `records`.
    pub fn with_records(records: Vec<GameRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    /// Make the next call fail with `error`.
    pub fn set_next_error(&self, error: CatalogError) {
        if let Ok(mut next) = self.next_error.lock() {
            *next = Some(error);
        }
    }

    /// Make every call fail (or succeed again) until changed.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Calls received so far.
    pub fn recorded_calls(&self) -> Vec<RecordedCatalogCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn begin(&self, call: RecordedCatalogCall) -> Result<(), CatalogError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if let Some(error) = self.next_error.lock().ok().and_then(|mut e| e.take()) {
            return Err(error);
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CatalogError::Database("store unavailable".to_string()));
        }
        Ok(())
    }

    fn records(&self) -> Result<Vec<GameRecord>, CatalogError> {
        self.records
            .read()
            .map(|records| records.clone())
            .map_err(|_| CatalogError::Database("mock lock poisoned".to_string()))
    }

    fn find(&self, id: GameId) -> Result<GameRecord, CatalogError> {
        self.records()?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or(CatalogError::NotFound(id))
    }
}

impl GameCatalog for MockGameCatalog {
    fn search(&self, criteria: &SearchCriteria) -> Result<Vec<GameRecord>, CatalogError> {
        self.begin(RecordedCatalogCall::Search(criteria.clone()))?;
        let mut matches: Vec<GameRecord> = self
            .records()?
            .into_iter()
            .filter(|record| criteria.matches(record))
            .collect();
        matches.sort_by_key(|record| record.id);
        Ok(matches)
    }

    fn get(&self, id: GameId) -> Result<GameRecord, CatalogError> {
        self.begin(RecordedCatalogCall::Get(id))?;
        self.find(id)
    }

    fn artwork(&self, id: GameId) -> Result<ArtworkRef, CatalogError> {
        self.begin(RecordedCatalogCall::Artwork(id))?;
        self.find(id).map(|record| ArtworkRef {
            artwork_url: record.artwork_url,
        })
    }

    fn count(&self) -> Result<u64, CatalogError> {
        self.begin(RecordedCatalogCall::Count)?;
        Ok(self.records()?.len() as u64)
    }
}
