//! User preference endpoints
//!
//! The whole preference document lives under one storage key. `GET` reads it
//! (defaults when missing or corrupt), `POST` shallow-merges a partial
//! object, `PUT` replaces it wholesale, `DELETE` resets it. Writes are
//! last-writer-wins; there is no cross-session merge.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use claudemanual_core::storage::UserPreferences;

use crate::error::AppError;
use crate::types::{FavoriteRequest, SearchHistoryRequest, StageFilterRequest};
use crate::AppState;

/// Build the preferences router
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_preferences)
                .post(merge_preferences)
                .put(replace_preferences)
                .delete(reset_preferences),
        )
        .route("/favorites/toggle", post(toggle_favorite))
        .route("/search-history", post(add_search_history))
        .route("/filters/stage/toggle", post(toggle_stage_filter))
        .route("/filters/clear", post(clear_filters))
}

async fn get_preferences(State(state): State<AppState>) -> Json<UserPreferences> {
    Json(state.preferences.get())
}

async fn merge_preferences(
    State(state): State<AppState>,
    Json(partial): Json<Value>,
) -> Result<Json<UserPreferences>, AppError> {
    if !partial.is_object() {
        return Err(AppError::BadRequest(
            "Preference update must be a JSON object".to_string(),
        ));
    }
    let merged = state.preferences.save(&partial)?;
    Ok(Json(merged))
}

async fn replace_preferences(
    State(state): State<AppState>,
    Json(prefs): Json<UserPreferences>,
) -> Result<Json<UserPreferences>, AppError> {
    state.preferences.replace(&prefs)?;
    Ok(Json(prefs))
}

async fn reset_preferences(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.preferences.reset()?;
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_favorite(
    State(state): State<AppState>,
    Json(req): Json<FavoriteRequest>,
) -> Result<Json<UserPreferences>, AppError> {
    let prefs = state.preferences.toggle_favorite(&req.id)?;
    Ok(Json(prefs))
}

async fn add_search_history(
    State(state): State<AppState>,
    Json(req): Json<SearchHistoryRequest>,
) -> Result<Json<UserPreferences>, AppError> {
    let prefs = state.preferences.add_search_history(&req.query)?;
    Ok(Json(prefs))
}

async fn toggle_stage_filter(
    State(state): State<AppState>,
    Json(req): Json<StageFilterRequest>,
) -> Result<Json<UserPreferences>, AppError> {
    let prefs = state.preferences.toggle_stage_filter(&req.stage)?;
    Ok(Json(prefs))
}

async fn clear_filters(State(state): State<AppState>) -> Result<Json<UserPreferences>, AppError> {
    let prefs = state.preferences.clear_filters()?;
    Ok(Json(prefs))
}
