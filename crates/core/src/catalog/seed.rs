//! Out-of-band catalog loading from a JSON seed file.

use std::path::Path;

use tracing::info;

use super::{CatalogError, GameCatalog, GameRecord, SqliteGameCatalog};

/// Parse a JSON array of game records.
pub fn parse_seed(json: &str) -> Result<Vec<GameRecord>, CatalogError> {
    serde_json::from_str(json).map_err(|e| CatalogError::Seed(e.to_string()))
}

/// Load the seed file into the catalog if the catalog is still empty.
///
/// Returns the number of records inserted (0 when the catalog already had
/// data).
pub fn seed_if_empty(catalog: &SqliteGameCatalog, path: &Path) -> Result<usize, CatalogError> {
    if catalog.count()? > 0 {
        info!("Catalog already populated, skipping seed file {:?}", path);
        return Ok(0);
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| CatalogError::Seed(format!("{}: {}", path.display(), e)))?;
    let records = parse_seed(&contents)?;
    let inserted = catalog.insert_many(&records)?;

    info!("Seeded catalog with {} records from {:?}", inserted, path);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::testing::fixtures;

    fn seed_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&fixtures::sample_catalog()).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_seed() {
        let json = r#"[{
            "id": 10,
            "title": "Chrono Trigger",
            "developer": "Square",
            "publisher": "Square",
            "genre": "RPG",
            "platform": "SNES",
            "release_date": "1995-03-11",
            "artwork_url": "chrono-trigger.png"
        }]"#;
        let records = parse_seed(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].release_date.to_string(), "1995-03-11");
    }

    #[test]
    fn test_parse_seed_rejects_invalid_date() {
        let json = r#"[{
            "id": 10, "title": "t", "developer": "d", "publisher": "p",
            "genre": "g", "platform": "pc", "release_date": "1995-13-45",
            "artwork_url": "a.png"
        }]"#;
        assert!(matches!(parse_seed(json), Err(CatalogError::Seed(_))));
    }

    #[test]
    fn test_seed_if_empty_inserts_records() {
        let catalog = SqliteGameCatalog::in_memory().unwrap();
        let file = seed_file();

        let inserted = seed_if_empty(&catalog, file.path()).unwrap();
        assert_eq!(inserted, fixtures::sample_catalog().len());
        assert_eq!(catalog.count().unwrap() as usize, inserted);
    }

    #[test]
    fn test_seed_skipped_when_populated() {
        let catalog = SqliteGameCatalog::in_memory().unwrap();
        catalog.insert(&fixtures::game(100, "Pong")).unwrap();
        let file = seed_file();

        assert_eq!(seed_if_empty(&catalog, file.path()).unwrap(), 0);
        assert_eq!(catalog.count().unwrap(), 1);
    }

    #[test]
    fn test_seed_missing_file() {
        let catalog = SqliteGameCatalog::in_memory().unwrap();
        let result = seed_if_empty(&catalog, Path::new("/nonexistent/seed.json"));
        assert!(matches!(result, Err(CatalogError::Seed(_))));
    }
}
