pub mod browser;
pub mod catalog;
pub mod config;
pub mod testing;

pub use browser::{
    Action, ApiError, BrowserHandle, BrowserSession, BrowserState, CatalogApi, Command,
    HttpCatalogApi, RequestSeq, SearchMode, SearchStatus, SortKey, StatusMessage,
};
pub use catalog::{
    ArtworkRef, CatalogError, CatalogQuery, FilterField, GameCatalog, GameId, GameRecord,
    SearchCriteria, SqliteGameCatalog,
};
pub use config::{
    load_config, load_config_from_str, validate_config, AssetMode, AssetsConfig, BrowserConfig,
    Config, ConfigError, CorsConfig, DatabaseConfig, ServerConfig,
};
