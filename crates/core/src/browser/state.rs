//! Browser state and the values it is built from.

use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::catalog::{GameRecord, SearchCriteria};

/// Issuance order of a request. Only the latest issued request may update
/// the displayed results.
pub type RequestSeq = u64;

/// Where a search field group is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// No criteria entered.
    #[default]
    Idle,
    /// A request is in flight.
    Querying,
    /// Results are shown.
    Loaded,
    /// The last search matched nothing.
    Empty,
    /// The last search failed; previous results were cleared.
    Failed,
}

/// User-visible message next to the result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Search was requested with every field blank.
    Prompt,
    /// The search matched no records.
    NoResults,
    /// A request failed.
    Error(String),
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::Prompt => write!(f, "Please enter search criteria"),
            StatusMessage::NoResults => write!(f, "No results found"),
            StatusMessage::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

/// When searches are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Only on an explicit search action.
    #[default]
    OnSubmit,
    /// Local filtering on every edit plus a debounced server request.
    Incremental,
}

/// Key for in-place result sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    ReleaseDate,
}

/// Complete client-side state of the catalog browser.
///
/// Transitions only through [`BrowserState::apply`].
#[derive(Debug, Clone)]
pub struct BrowserState {
    pub(super) criteria: SearchCriteria,
    pub(super) results: Vec<GameRecord>,
    pub(super) status: SearchStatus,
    pub(super) message: Option<StatusMessage>,
    pub(super) artwork: Option<String>,
    pub(super) dataset: Option<Arc<Vec<GameRecord>>>,
    pub(super) latest_seq: RequestSeq,
    pub(super) dataset_seq: RequestSeq,
    pub(super) mode: SearchMode,
    pub(super) asset_base: Url,
}

impl BrowserState {
    pub fn new(mode: SearchMode, asset_base: Url) -> Self {
        Self {
            criteria: SearchCriteria::default(),
            results: Vec::new(),
            status: SearchStatus::Idle,
            message: None,
            artwork: None,
            dataset: None,
            latest_seq: 0,
            dataset_seq: 0,
            mode,
            asset_base,
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn results(&self) -> &[GameRecord] {
        &self.results
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Resolved URL of the artwork currently shown, if any.
    pub fn artwork(&self) -> Option<&str> {
        self.artwork.as_deref()
    }

    /// Size of the locally cached dataset, if one has been loaded.
    pub fn dataset_len(&self) -> Option<usize> {
        self.dataset.as_ref().map(|records| records.len())
    }

    pub fn latest_seq(&self) -> RequestSeq {
        self.latest_seq
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn asset_base(&self) -> &Url {
        &self.asset_base
    }

    pub(super) fn issue_seq(&mut self) -> RequestSeq {
        self.latest_seq += 1;
        self.latest_seq
    }

    pub(super) fn issue_dataset_seq(&mut self) -> RequestSeq {
        self.dataset_seq += 1;
        self.dataset_seq
    }
}
