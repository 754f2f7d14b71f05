//! API routes

use axum::Router;

use crate::AppState;

mod catalog;
mod docs;
mod files;
mod preferences;
mod search;

/// Build the API router with all endpoints
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .merge(search::router())
        .merge(docs::router())
        .merge(files::router())
        .nest("/preferences", preferences::router())
}
