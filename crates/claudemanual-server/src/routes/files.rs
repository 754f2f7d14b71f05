//! Raw file content endpoint
//!
//! Serves file content from the documentation root, restricted to an
//! allow-list of top-level directories. Traversal and absolute paths are
//! rejected before the filesystem is touched.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tokio::fs;

use crate::error::AppError;
use crate::types::{FileContentQuery, FileContentResponse};
use crate::utils::paths::{normalize_within, top_level_component};
use crate::AppState;

/// Top-level directories clients may read from.
const ALLOWED_ROOTS: [&str; 6] = [
    "skills",
    "commands",
    "agents",
    "architecture",
    "workflows",
    "docs",
];

/// Build the file content router
pub fn router() -> Router<AppState> {
    Router::new().route("/file-content", get(file_content))
}

async fn file_content(
    State(state): State<AppState>,
    Query(query): Query<FileContentQuery>,
) -> Result<Json<FileContentResponse>, AppError> {
    let path = normalize_within(&state.docs_root, &query.path)?;

    let top = top_level_component(&query.path)
        .ok_or_else(|| AppError::BadRequest("Invalid path".to_string()))?;
    if !ALLOWED_ROOTS.contains(&top.as_str()) {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }

    let metadata = fs::metadata(&path)
        .await
        .map_err(|_| AppError::NotFound("File not found".to_string()))?;
    if metadata.is_dir() {
        return Err(AppError::BadRequest("Path is a directory".to_string()));
    }

    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read file: {}", e)))?;

    Ok(Json(FileContentResponse {
        path: query.path,
        content,
    }))
}
