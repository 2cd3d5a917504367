//! The browser reducer: every user action and network completion is one
//! transition of [`BrowserState`].

use std::sync::Arc;

use tracing::{debug, warn};

use super::artwork::resolve_artwork_url;
use super::client::ApiError;
use super::sort::sort_records;
use super::state::{BrowserState, RequestSeq, SearchMode, SearchStatus, SortKey, StatusMessage};
use crate::catalog::{FilterField, GameId, GameRecord, SearchCriteria};

/// Inputs to the reducer.
#[derive(Debug)]
pub enum Action {
    /// A search field changed.
    EditField { field: FilterField, value: String },
    /// Explicit search request.
    Search,
    /// Reset criteria, results and message.
    Clear,
    /// Reorder the current results.
    Sort(SortKey),
    /// Show the artwork of a record in the current results.
    OpenArtwork(GameId),
    CloseArtwork,
    /// Fetch the full catalog for local filtering.
    LoadDataset,
    /// A search request finished.
    SearchCompleted {
        seq: RequestSeq,
        outcome: Result<Vec<GameRecord>, ApiError>,
    },
    /// A full-catalog request finished.
    DatasetLoaded {
        seq: RequestSeq,
        outcome: Result<Vec<GameRecord>, ApiError>,
    },
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send a search now.
    Fetch {
        seq: RequestSeq,
        criteria: SearchCriteria,
    },
    /// Send a search once input has been quiet for the debounce window.
    DebouncedFetch {
        seq: RequestSeq,
        criteria: SearchCriteria,
    },
    /// Fetch the whole catalog.
    FetchAll { seq: RequestSeq },
}

impl BrowserState {
    /// Apply one action, returning the next state and any command to run.
    pub fn apply(mut self, action: Action) -> (Self, Option<Command>) {
        let command = match action {
            Action::EditField { field, value } => {
                self.criteria.set(field, value);
                match self.mode {
                    SearchMode::OnSubmit => None,
                    SearchMode::Incremental => self.refilter(),
                }
            }
            Action::Search => self.search(),
            Action::Clear => {
                self.issue_seq();
                self.criteria = SearchCriteria::default();
                self.results.clear();
                self.message = None;
                self.status = SearchStatus::Idle;
                None
            }
            Action::Sort(key) => {
                sort_records(&mut self.results, key);
                None
            }
            Action::OpenArtwork(id) => {
                self.open_artwork(id);
                None
            }
            Action::CloseArtwork => {
                self.artwork = None;
                None
            }
            Action::LoadDataset => Some(Command::FetchAll {
                seq: self.issue_dataset_seq(),
            }),
            Action::SearchCompleted { seq, outcome } => {
                self.complete_search(seq, outcome);
                None
            }
            Action::DatasetLoaded { seq, outcome } => {
                if seq != self.dataset_seq {
                    debug!("Ignoring superseded dataset response {}", seq);
                } else {
                    match outcome {
                        Ok(records) => {
                            debug!("Loaded dataset of {} records", records.len());
                            self.dataset = Some(Arc::new(records));
                            self.filter_pending_edit();
                        }
                        Err(e) => warn!("Failed to load dataset: {}", e),
                    }
                }
                None
            }
        };

        (self, command)
    }

    fn search(&mut self) -> Option<Command> {
        if self.criteria.is_empty() {
            self.issue_seq();
            self.results.clear();
            self.status = SearchStatus::Idle;
            self.message = Some(StatusMessage::Prompt);
            return None;
        }

        self.status = SearchStatus::Querying;
        self.message = None;
        Some(Command::Fetch {
            seq: self.issue_seq(),
            criteria: self.criteria.clone(),
        })
    }

    /// Incremental mode: filter locally right away and schedule the
    /// authoritative request.
    fn refilter(&mut self) -> Option<Command> {
        let seq = self.issue_seq();

        if self.criteria.is_empty() {
            self.results.clear();
            self.status = SearchStatus::Idle;
            self.message = Some(StatusMessage::Prompt);
            return None;
        }

        match self.local_matches() {
            Some(local) => self.show(local),
            None => {
                self.status = SearchStatus::Querying;
                self.message = None;
            }
        }

        Some(Command::DebouncedFetch {
            seq,
            criteria: self.criteria.clone(),
        })
    }

    /// Dataset arrived while an incremental edit is still waiting on the
    /// server: show the local matches now. The pending request keeps its seq.
    fn filter_pending_edit(&mut self) {
        if self.mode != SearchMode::Incremental
            || self.criteria.is_empty()
            || self.status != SearchStatus::Querying
        {
            return;
        }
        if let Some(local) = self.local_matches() {
            self.show(local);
        }
    }

    fn local_matches(&self) -> Option<Vec<GameRecord>> {
        let dataset = self.dataset.as_ref()?;
        Some(
            dataset
                .iter()
                .filter(|record| self.criteria.matches(record))
                .cloned()
                .collect(),
        )
    }

    fn complete_search(&mut self, seq: RequestSeq, outcome: Result<Vec<GameRecord>, ApiError>) {
        if seq != self.latest_seq {
            debug!(
                "Discarding stale search response {} (latest {})",
                seq, self.latest_seq
            );
            return;
        }

        match outcome {
            Ok(records) => self.show(records),
            Err(e) => {
                warn!("Search request {} failed: {}", seq, e);
                self.results.clear();
                self.status = SearchStatus::Failed;
                self.message = Some(StatusMessage::Error(e.to_string()));
            }
        }
    }

    fn show(&mut self, records: Vec<GameRecord>) {
        if records.is_empty() {
            self.results.clear();
            self.status = SearchStatus::Empty;
            self.message = Some(StatusMessage::NoResults);
        } else {
            self.results = records;
            self.status = SearchStatus::Loaded;
            self.message = None;
        }
    }

    fn open_artwork(&mut self, id: GameId) {
        let Some(record) = self.results.iter().find(|record| record.id == id) else {
            self.message = Some(StatusMessage::Error(format!(
                "Game {} is not in the current results",
                id
            )));
            return;
        };

        match resolve_artwork_url(&record.artwork_url, &self.asset_base) {
            Ok(url) => self.artwork = Some(url),
            Err(e) => self.message = Some(StatusMessage::Error(e.to_string())),
        }
    }
}
