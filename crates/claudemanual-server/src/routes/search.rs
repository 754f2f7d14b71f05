//! Search endpoint

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use claudemanual_core::catalog::{self, search::search, CatalogEntry};

use crate::types::SearchQuery;
use crate::AppState;

/// Build the search router
pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search_catalog))
}

/// Scored substring search across all three entity types, capped at 50.
/// An empty or missing query returns an empty list.
async fn search_catalog(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<CatalogEntry>> {
    let Some(q) = query.q else {
        return Json(Vec::new());
    };

    let mut corpus = catalog::load_skills(&state.docs_root).entries;
    corpus.extend(catalog::load_commands(&state.docs_root).entries);
    corpus.extend(catalog::load_agents(&state.docs_root).entries);

    Json(search(&q, &corpus))
}
