//! Video game catalog - the read-only store behind the query service.
//!
//! Records are loaded out of band (see [`seed`]); the service itself only
//! reads them.

mod query;
pub mod seed;
mod sqlite;
mod types;

pub use query::CatalogQuery;
pub use sqlite::SqliteGameCatalog;
pub use types::*;

/// Trait for game catalog storage.
pub trait GameCatalog: Send + Sync {
    /// Records matching every active criterion, ordered by id.
    ///
    /// Empty criteria return the whole catalog.
    fn search(&self, criteria: &SearchCriteria) -> Result<Vec<GameRecord>, CatalogError>;

    /// Get a single record by id.
    fn get(&self, id: GameId) -> Result<GameRecord, CatalogError>;

    /// Get only the artwork reference of a record.
    fn artwork(&self, id: GameId) -> Result<ArtworkRef, CatalogError>;

    /// Number of records in the catalog.
    fn count(&self) -> Result<u64, CatalogError>;
}
