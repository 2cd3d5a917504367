//! SQLite-backed game catalog implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{functions::FunctionFlags, params, params_from_iter, Connection};
use tracing::debug;

use super::query::{RECORD_COLUMNS, UNICODE_LOWER};
use super::{ArtworkRef, CatalogError, CatalogQuery, GameCatalog, GameId, GameRecord, SearchCriteria};

/// SQLite-backed game catalog.
pub struct SqliteGameCatalog {
    conn: Mutex<Connection>,
}

impl SqliteGameCatalog {
    /// Open (or create) the catalog database at `path`.
    pub fn new(path: &Path) -> Result<Self, CatalogError> {
        let conn = Connection::open(path).map_err(|e| CatalogError::Database(e.to_string()))?;
        Self::register_functions(&conn)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory catalog (useful for testing).
    pub fn in_memory() -> Result<Self, CatalogError> {
        let conn =
            Connection::open_in_memory().map_err(|e| CatalogError::Database(e.to_string()))?;
        Self::register_functions(&conn)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Scalar functions search queries rely on. Must run on every connection.
    fn register_functions(conn: &Connection) -> Result<(), CatalogError> {
        conn.create_scalar_function(
            UNICODE_LOWER,
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let value: String = ctx.get(0)?;
                Ok(value.to_lowercase())
            },
        )
        .map_err(|e| CatalogError::Database(e.to_string()))
    }

    fn initialize_schema(conn: &Connection) -> Result<(), CatalogError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS videogames (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                developer TEXT NOT NULL,
                publisher TEXT NOT NULL,
                genre TEXT NOT NULL,
                platform TEXT NOT NULL,
                release_date TEXT NOT NULL,
                artwork_url TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_videogames_title ON videogames(title);
            CREATE INDEX IF NOT EXISTS idx_videogames_developer ON videogames(developer);
            CREATE INDEX IF NOT EXISTS idx_videogames_publisher ON videogames(publisher);
            CREATE INDEX IF NOT EXISTS idx_videogames_genre ON videogames(genre);
            CREATE INDEX IF NOT EXISTS idx_videogames_platform ON videogames(platform);
            "#,
        )
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, CatalogError> {
        self.conn
            .lock()
            .map_err(|_| CatalogError::Database("connection lock poisoned".to_string()))
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<GameRecord> {
        Ok(GameRecord {
            id: row.get(0)?,
            title: row.get(1)?,
            developer: row.get(2)?,
            publisher: row.get(3)?,
            genre: row.get(4)?,
            platform: row.get(5)?,
            release_date: row.get(6)?,
            artwork_url: row.get(7)?,
        })
    }

    /// Insert a single record. Fails on a duplicate id.
    pub fn insert(&self, record: &GameRecord) -> Result<(), CatalogError> {
        self.insert_many(std::slice::from_ref(record)).map(|_| ())
    }

    /// Insert records in one transaction; nothing is written if any insert fails.
    ///
    /// Returns the number of records inserted.
    pub fn insert_many(&self, records: &[GameRecord]) -> Result<usize, CatalogError> {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO videogames (id, title, developer, publisher, genre, platform, release_date, artwork_url)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .map_err(|e| CatalogError::Database(e.to_string()))?;

            for record in records {
                stmt.execute(params![
                    record.id,
                    &record.title,
                    &record.developer,
                    &record.publisher,
                    &record.genre,
                    &record.platform,
                    record.release_date,
                    &record.artwork_url,
                ])
                .map_err(|e| CatalogError::Database(e.to_string()))?;
            }
        }

        tx.commit()
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(records.len())
    }
}

impl GameCatalog for SqliteGameCatalog {
    fn search(&self, criteria: &SearchCriteria) -> Result<Vec<GameRecord>, CatalogError> {
        let conn = self.conn()?;
        let query = CatalogQuery::from_criteria(criteria);

        debug!(
            "Catalog search on fields {:?}",
            CatalogQuery::constrained_fields(criteria)
        );

        let mut stmt = conn
            .prepare(query.sql())
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params_from_iter(query.params()), Self::row_to_record)
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| CatalogError::Database(e.to_string()))?);
        }

        Ok(results)
    }

    fn get(&self, id: GameId) -> Result<GameRecord, CatalogError> {
        let conn = self.conn()?;

        conn.query_row(
            &format!("SELECT {} FROM videogames WHERE id = ?", RECORD_COLUMNS),
            params![id],
            Self::row_to_record,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => CatalogError::NotFound(id),
            _ => CatalogError::Database(e.to_string()),
        })
    }

    fn artwork(&self, id: GameId) -> Result<ArtworkRef, CatalogError> {
        let conn = self.conn()?;

        conn.query_row(
            "SELECT artwork_url FROM videogames WHERE id = ?",
            params![id],
            |row| {
                Ok(ArtworkRef {
                    artwork_url: row.get(0)?,
                })
            },
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => CatalogError::NotFound(id),
            _ => CatalogError::Database(e.to_string()),
        })
    }

    fn count(&self) -> Result<u64, CatalogError> {
        let conn = self.conn()?;

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM videogames", [], |row| row.get(0))
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(count as u64)
    }
}
