use std::sync::Arc;
use gamecatalog_core::{Config, GameCatalog};

/// Shared application state
pub struct AppState {
    config: Config,
    catalog: Arc<dyn GameCatalog>,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<dyn GameCatalog>) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &dyn GameCatalog {
        self.catalog.as_ref()
    }
}
