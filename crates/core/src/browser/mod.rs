//! Catalog browser core.
//!
//! Holds the search criteria, the displayed results and the selected
//! artwork, and decides when to query the service. All of it is modelled as
//! a [`BrowserState`] value that moves through [`BrowserState::apply`]; the
//! [`BrowserSession`] task feeds it user actions and network completions.
//!
//! Overlapping requests are ordered by issuance: each request carries a
//! [`RequestSeq`], and a completion only lands if it belongs to the latest
//! request issued. In [`SearchMode::Incremental`] the local filter over the
//! loaded dataset is shown first and the server's answer replaces it when it
//! arrives.

mod artwork;
mod client;
mod debounce;
mod session;
mod sort;
mod state;
mod update;

pub use artwork::{resolve_artwork_url, ArtworkError};
pub use client::{ApiError, CatalogApi, HttpCatalogApi};
pub use debounce::Debouncer;
pub use session::{BrowserHandle, BrowserSession};
pub use sort::sort_records;
pub use state::{BrowserState, RequestSeq, SearchMode, SearchStatus, SortKey, StatusMessage};
pub use update::{Action, Command};
