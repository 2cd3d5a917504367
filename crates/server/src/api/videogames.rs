//! Video game query handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::error;

use gamecatalog_core::{ArtworkRef, CatalogError, GameId, GameRecord, SearchCriteria};

use crate::metrics::record_catalog_query;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Map a store result to a response, counting the outcome.
///
/// Store failures are logged here and never leak their message to clients.
fn respond<T>(operation: &str, result: Result<T, CatalogError>) -> ApiResult<T> {
    match result {
        Ok(value) => {
            record_catalog_query(operation, "ok");
            Ok(Json(value))
        }
        Err(CatalogError::NotFound(id)) => {
            record_catalog_query(operation, "not_found");
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Game not found: {}", id),
                }),
            ))
        }
        Err(e) => {
            record_catalog_query(operation, "error");
            error!("Catalog {} failed: {}", operation, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                }),
            ))
        }
    }
}

/// GET /videogames
///
/// Records matching every supplied filter (case-insensitive substring).
/// Blank or missing filters are ignored; no filters returns the whole catalog.
pub async fn list_videogames(
    State(state): State<Arc<AppState>>,
    Query(criteria): Query<SearchCriteria>,
) -> ApiResult<Vec<GameRecord>> {
    respond("search", state.catalog().search(&criteria))
}

/// GET /videogames/{id}
pub async fn get_videogame(
    State(state): State<Arc<AppState>>,
    Path(id): Path<GameId>,
) -> ApiResult<GameRecord> {
    respond("get", state.catalog().get(id))
}

/// GET /videogames/{id}/artwork
pub async fn get_artwork(
    State(state): State<Arc<AppState>>,
    Path(id): Path<GameId>,
) -> ApiResult<ArtworkRef> {
    respond("artwork", state.catalog().artwork(id))
}
