//! Types for the video game catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a catalog entry.
pub type GameId = i64;

/// A single video game in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Unique, stable identifier.
    pub id: GameId,
    pub title: String,
    pub developer: String,
    pub publisher: String,
    pub genre: String,
    pub platform: String,
    /// Release date, `YYYY-MM-DD` on the wire.
    pub release_date: NaiveDate,
    /// Absolute URL or a path relative to the static artwork base.
    pub artwork_url: String,
}

impl GameRecord {
    /// Value of a filterable field.
    pub fn field(&self, field: FilterField) -> &str {
        match field {
            FilterField::Title => &self.title,
            FilterField::Developer => &self.developer,
            FilterField::Publisher => &self.publisher,
            FilterField::Genre => &self.genre,
            FilterField::Platform => &self.platform,
        }
    }
}

/// Payload of the artwork endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkRef {
    pub artwork_url: String,
}

/// A field that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Title,
    Developer,
    Publisher,
    Genre,
    Platform,
}

impl FilterField {
    /// All filterable fields, in display order.
    pub const ALL: [FilterField; 5] = [
        FilterField::Title,
        FilterField::Developer,
        FilterField::Publisher,
        FilterField::Genre,
        FilterField::Platform,
    ];

    /// Name used as the query parameter.
    pub fn param_name(self) -> &'static str {
        match self {
            FilterField::Title => "title",
            FilterField::Developer => "developer",
            FilterField::Publisher => "publisher",
            FilterField::Genre => "genre",
            FilterField::Platform => "platform",
        }
    }

    /// Column backing this field in the store.
    pub fn column(self) -> &'static str {
        // Only static names may reach SQL text.
        match self {
            FilterField::Title => "title",
            FilterField::Developer => "developer",
            FilterField::Publisher => "publisher",
            FilterField::Genre => "genre",
            FilterField::Platform => "platform",
        }
    }
}

/// Per-field substring filters.
///
/// Blank (empty or whitespace-only) values place no constraint on their
/// field. Deserializes straight from the `/videogames` query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    pub title: String,
    pub developer: String,
    pub publisher: String,
    pub genre: String,
    pub platform: String,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy in tests and fixtures.
    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Title => &self.title,
            FilterField::Developer => &self.developer,
            FilterField::Publisher => &self.publisher,
            FilterField::Genre => &self.genre,
            FilterField::Platform => &self.platform,
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let slot = match field {
            FilterField::Title => &mut self.title,
            FilterField::Developer => &mut self.developer,
            FilterField::Publisher => &mut self.publisher,
            FilterField::Genre => &mut self.genre,
            FilterField::Platform => &mut self.platform,
        };
        *slot = value.into();
    }

    /// Active constraints: trimmed, non-blank values only.
    pub fn active(&self) -> impl Iterator<Item = (FilterField, &str)> + '_ {
        FilterField::ALL.into_iter().filter_map(move |field| {
            let value = self.get(field).trim();
            (!value.is_empty()).then_some((field, value))
        })
    }

    /// True when no field constrains the search.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Case-insensitive substring match on every active field.
    ///
    /// Empty criteria match every record.
    pub fn matches(&self, record: &GameRecord) -> bool {
        self.active().all(|(field, needle)| {
            record
                .field(field)
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }
}

/// Errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Game not found: {0}")]
    NotFound(GameId),

    #[error("Seed error: {0}")]
    Seed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, developer: &str) -> GameRecord {
        GameRecord {
            id: 1,
            title: title.to_string(),
            developer: developer.to_string(),
            publisher: "Nintendo".to_string(),
            genre: "Platformer".to_string(),
            platform: "NES".to_string(),
            release_date: NaiveDate::from_ymd_opt(1985, 9, 13).unwrap(),
            artwork_url: "mario.png".to_string(),
        }
    }

    #[test]
    fn test_blank_criteria_is_empty() {
        let criteria = SearchCriteria::new()
            .with(FilterField::Title, "   ")
            .with(FilterField::Genre, "\t");
        assert!(criteria.is_empty());
        assert_eq!(criteria.active().count(), 0);
    }

    #[test]
    fn test_active_trims_values() {
        let criteria = SearchCriteria::new().with(FilterField::Platform, "  snes ");
        let active: Vec<_> = criteria.active().collect();
        assert_eq!(active, vec![(FilterField::Platform, "snes")]);
    }

    #[test]
    fn test_matches_case_insensitive_substring() {
        let criteria = SearchCriteria::new().with(FilterField::Title, "MARIO");
        assert!(criteria.matches(&record("Super Mario Bros", "Nintendo EAD")));
        assert!(!criteria.matches(&record("Sonic", "Sonic Team")));
    }

    #[test]
    fn test_matches_is_conjunctive() {
        let criteria = SearchCriteria::new()
            .with(FilterField::Title, "mario")
            .with(FilterField::Developer, "sega");
        assert!(!criteria.matches(&record("Super Mario Bros", "Nintendo EAD")));
    }

    #[test]
    fn test_empty_criteria_match_everything() {
        assert!(SearchCriteria::new().matches(&record("Anything", "Anyone")));
    }

    #[test]
    fn test_criteria_from_partial_query() {
        let json = r#"{"title": "zelda"}"#;
        let criteria: SearchCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.title, "zelda");
        assert!(criteria.developer.is_empty());
    }

    #[test]
    fn test_record_serialization() {
        let json = serde_json::to_value(record("Super Mario Bros", "Nintendo EAD")).unwrap();
        assert_eq!(json["release_date"], "1985-09-13");
        assert_eq!(json["artwork_url"], "mario.png");
    }

    #[test]
    fn test_artwork_ref_uses_camel_case() {
        let artwork = ArtworkRef {
            artwork_url: "cover.png".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&artwork).unwrap(),
            r#"{"artworkUrl":"cover.png"}"#
        );
    }
}
