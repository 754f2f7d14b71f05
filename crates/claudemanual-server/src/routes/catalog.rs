//! Catalog endpoints
//!
//! Each handler re-scans its directory on every request; the corpus is tens
//! of files, so there is no cache to keep coherent. Scans fail soft: a
//! missing directory is an empty array with HTTP 200, never an error.

use axum::{extract::State, routing::get, Json, Router};
use tracing::warn;

use claudemanual_core::catalog::{self, CatalogEntry, ScanOutcome};

use crate::AppState;

/// Build the catalog router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/skills", get(list_skills))
        .route("/commands", get(list_commands))
        .route("/agents", get(list_agents))
}

async fn list_skills(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(into_entries(catalog::load_skills(&state.docs_root)))
}

async fn list_commands(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(into_entries(catalog::load_commands(&state.docs_root)))
}

async fn list_agents(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(into_entries(catalog::load_agents(&state.docs_root)))
}

/// Surface skipped files to operators; clients only see the entries.
fn into_entries(outcome: ScanOutcome) -> Vec<CatalogEntry> {
    for skipped in &outcome.skipped {
        warn!("Catalog skipped {:?}: {}", skipped.path, skipped.reason);
    }
    outcome.entries
}
