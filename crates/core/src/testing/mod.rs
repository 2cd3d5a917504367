//! Testing utilities and mock implementations.
//!
//! Mocks for both sides of the HTTP boundary, so the service can be tested
//! without a database and the browser without a server.
//!
//! # Example
//!
//! ```rust,ignore
//! use gamecatalog_core::testing::{fixtures, MockCatalogApi, MockGameCatalog};
//!
//! let catalog = MockGameCatalog::with_records(fixtures::sample_catalog());
//! let api = MockCatalogApi::with_records(fixtures::sample_catalog());
//! ```

mod mock_catalog_api;
mod mock_game_catalog;

pub use mock_catalog_api::MockCatalogApi;
pub use mock_game_catalog::{MockGameCatalog, RecordedCatalogCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::NaiveDate;

    use crate::catalog::{GameId, GameRecord};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }

    /// Create a test record with reasonable defaults.
    pub fn game(id: GameId, title: &str) -> GameRecord {
        GameRecord {
            id,
            title: title.to_string(),
            developer: "Test Developer".to_string(),
            publisher: "Test Publisher".to_string(),
            genre: "Action".to_string(),
            platform: "PC".to_string(),
            release_date: date(2000, 1, 1),
            artwork_url: format!("game-{}.png", id),
        }
    }

    /// Create a test record with a specific release date.
    pub fn game_released(id: GameId, title: &str, release_date: NaiveDate) -> GameRecord {
        GameRecord {
            release_date,
            ..game(id, title)
        }
    }

    /// Create a test record with a specific artwork reference.
    pub fn game_with_artwork(id: GameId, title: &str, artwork_url: &str) -> GameRecord {
        GameRecord {
            artwork_url: artwork_url.to_string(),
            ..game(id, title)
        }
    }

    /// A small catalog covering every filterable field, with ids 1..=6.
    pub fn sample_catalog() -> Vec<GameRecord> {
        let rows = [
            (1, "Super Mario Bros", "Nintendo EAD", "Nintendo", "Platformer", "NES", date(1985, 9, 13), "super-mario-bros.png"),
            (2, "Sonic the Hedgehog", "Sonic Team", "Sega", "Platformer", "Genesis", date(1991, 6, 23), "https://images.example.com/sonic.jpg"),
            (3, "The Legend of Zelda", "Nintendo R&D4", "Nintendo", "Action-Adventure", "NES", date(1986, 2, 21), "zelda.png"),
            (4, "Metroid Prime", "Retro Studios", "Nintendo", "Action-Adventure", "GameCube", date(2002, 11, 17), "/metroid-prime.png"),
            (5, "Street Fighter II", "Capcom", "Capcom", "Fighting", "SNES", date(1991, 2, 6), "street-fighter-2.png"),
            (6, "Half-Life", "Valve", "Sierra", "Shooter", "PC", date(1998, 11, 19), "https://images.example.com/half-life.jpg"),
        ];

        rows.into_iter()
            .map(
                |(id, title, developer, publisher, genre, platform, release_date, artwork_url)| {
                    GameRecord {
                        id,
                        title: title.to_string(),
                        developer: developer.to_string(),
                        publisher: publisher.to_string(),
                        genre: genre.to_string(),
                        platform: platform.to_string(),
                        release_date,
                        artwork_url: artwork_url.to_string(),
                    }
                },
            )
            .collect()
    }
}
