//! Request and response types for the API

use serde::{Deserialize, Serialize};

// ============================================================================
// Search Types
// ============================================================================

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

// ============================================================================
// Document Tree Types
// ============================================================================

#[derive(Deserialize)]
pub struct DocQuery {
    /// When present, return this file's raw content instead of the tree.
    pub file: Option<String>,
}

/// One node of a recursive folder/file hierarchy.
#[derive(Serialize)]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

#[derive(Serialize)]
pub struct TreeResponse {
    pub root: String,
    pub entries: Vec<TreeNode>,
}

// ============================================================================
// File Content Types
// ============================================================================

#[derive(Deserialize)]
pub struct FileContentQuery {
    pub path: String,
}

#[derive(Serialize)]
pub struct FileContentResponse {
    pub path: String,
    pub content: String,
}

// ============================================================================
// Preference Types
// ============================================================================

#[derive(Deserialize)]
pub struct FavoriteRequest {
    pub id: String,
}

#[derive(Deserialize)]
pub struct SearchHistoryRequest {
    pub query: String,
}

#[derive(Deserialize)]
pub struct StageFilterRequest {
    pub stage: String,
}
