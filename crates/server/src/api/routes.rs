use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

use gamecatalog_core::{AssetMode, CorsConfig};

use super::{handlers, middleware::metrics_middleware, videogames};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let config = state.config().clone();

    let api_routes = Router::new()
        // Health and metrics
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        // Catalog queries
        .route("/videogames", get(videogames::list_videogames))
        .route("/videogames/{id}", get(videogames::get_videogame))
        .route("/videogames/{id}/artwork", get(videogames::get_artwork))
        .with_state(Arc::clone(&state));

    // Artwork images
    let mut router = api_routes.nest_service(
        &config.assets.url_prefix,
        ServeDir::new(&config.assets.dir),
    );

    // Built frontend with SPA fallback
    if config.assets.mode == AssetMode::Production {
        if let Some(frontend_dir) = &config.assets.frontend_dir {
            info!("Serving frontend from {:?}", frontend_dir);
            let index_path = frontend_dir.join("index.html");
            let serve_dir = ServeDir::new(frontend_dir).fallback(ServeFile::new(index_path));
            router = router.fallback_service(serve_dir);
        }
    }

    if let Some(cors) = cors_layer(&config.cors) {
        router = router.layer(cors);
    }

    router
        .layer(middleware::from_fn_with_state(state, metrics_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Read-only CORS policy for the configured browser origin.
fn cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    let origin = config.allowed_origin.as_deref()?;
    match HeaderValue::from_str(origin.trim_end_matches('/')) {
        Ok(value) => Some(
            CorsLayer::new()
                .allow_origin(value)
                .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
                .allow_headers(Any),
        ),
        Err(e) => {
            warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
            None
        }
    }
}
