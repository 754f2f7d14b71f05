//! Architecture and workflow document endpoints
//!
//! Without a `file` parameter these return a recursive folder/file hierarchy
//! of the corresponding subdirectory; with one they return raw file content
//! after a traversal check. A missing subdirectory is an empty tree with
//! HTTP 200.

use std::path::Path;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tokio::fs;

use crate::error::AppError;
use crate::types::{DocQuery, FileContentResponse, TreeNode, TreeResponse};
use crate::utils::paths::normalize_within;
use crate::AppState;

/// Recursion limit for tree building.
const MAX_TREE_DEPTH: usize = 12;

/// Build the docs router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/architecture", get(architecture))
        .route("/workflows", get(workflows))
}

async fn architecture(
    state: State<AppState>,
    query: Query<DocQuery>,
) -> Result<axum::response::Response, AppError> {
    doc_section(state, query, "architecture").await
}

async fn workflows(
    state: State<AppState>,
    query: Query<DocQuery>,
) -> Result<axum::response::Response, AppError> {
    doc_section(state, query, "workflows").await
}

async fn doc_section(
    State(state): State<AppState>,
    Query(query): Query<DocQuery>,
    section: &str,
) -> Result<axum::response::Response, AppError> {
    use axum::response::IntoResponse;

    let base = state.docs_root.join(section);

    if let Some(rel) = query.file {
        let path = normalize_within(&base, &rel)?;
        let content = read_doc_file(&path).await?;
        return Ok(Json(FileContentResponse { path: rel, content }).into_response());
    }

    let entries = if base.is_dir() {
        build_tree(&base, "", MAX_TREE_DEPTH).await?
    } else {
        tracing::debug!("Docs directory does not exist: {:?}", base);
        Vec::new()
    };

    Ok(Json(TreeResponse {
        root: section.to_string(),
        entries,
    })
    .into_response())
}

async fn read_doc_file(path: &Path) -> Result<String, AppError> {
    let metadata = fs::metadata(path)
        .await
        .map_err(|_| AppError::NotFound("File not found".to_string()))?;
    if metadata.is_dir() {
        return Err(AppError::BadRequest("Path is a directory".to_string()));
    }
    fs::read_to_string(path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read file: {}", e)))
}

/// Recursively build directory tree. Node paths are relative to the section
/// root so clients can feed them straight back into the `?file=` parameter.
async fn build_tree(path: &Path, rel: &str, depth: usize) -> Result<Vec<TreeNode>, AppError> {
    if depth == 0 {
        return Ok(vec![]);
    }

    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read directory: {}", e)))?;

    while let Some(entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read directory entry: {}", e)))?
    {
        let entry_path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        // Skip hidden files
        if name.starts_with('.') {
            continue;
        }

        let rel_path = if rel.is_empty() {
            name.clone()
        } else {
            format!("{rel}/{name}")
        };

        let is_dir = entry_path.is_dir();
        let children = if is_dir && depth > 1 {
            Some(Box::pin(build_tree(&entry_path, &rel_path, depth - 1)).await?)
        } else {
            None
        };

        entries.push(TreeNode {
            name,
            path: rel_path,
            is_dir,
            children,
        });
    }

    // Sort: directories first, then alphabetically
    entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn tree_sorts_directories_first() {
        let temp = tempdir().unwrap();
        std_fs::write(temp.path().join("overview.md"), "x").unwrap();
        std_fs::create_dir(temp.path().join("diagrams")).unwrap();
        std_fs::write(temp.path().join(".hidden.md"), "x").unwrap();

        let entries = build_tree(temp.path(), "", MAX_TREE_DEPTH).await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["diagrams", "overview.md"]);
    }

    #[tokio::test]
    async fn tree_recurses_into_subdirectories() {
        let temp = tempdir().unwrap();
        let sub = temp.path().join("flows");
        std_fs::create_dir(&sub).unwrap();
        std_fs::write(sub.join("intake.md"), "x").unwrap();

        let entries = build_tree(temp.path(), "", MAX_TREE_DEPTH).await.unwrap();
        let children = entries[0].children.as_ref().unwrap();
        assert_eq!(children[0].name, "intake.md");
    }

    #[tokio::test]
    async fn tree_paths_feed_back_into_file_lookup() {
        let temp = tempdir().unwrap();
        let sub = temp.path().join("flows");
        std_fs::create_dir(&sub).unwrap();
        std_fs::write(sub.join("intake.md"), "x").unwrap();

        let entries = build_tree(temp.path(), "", MAX_TREE_DEPTH).await.unwrap();
        let child = &entries[0].children.as_ref().unwrap()[0];
        assert_eq!(child.path, "flows/intake.md");

        // A returned path must pass the same validation `?file=` applies.
        let resolved = normalize_within(temp.path(), &child.path).unwrap();
        assert_eq!(read_doc_file(&resolved).await.unwrap(), "x");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let temp = tempdir().unwrap();
        let err = read_doc_file(&temp.path().join("absent.md")).await;
        assert!(matches!(err, Err(AppError::NotFound(_))));
    }
}
