//! Request path validation
//!
//! Every file-serving route takes a client-supplied relative path. The path
//! is normalized component-by-component before it ever touches the
//! filesystem; absolute paths and any traversal above the base are rejected.
//! Error messages stay generic so no filesystem layout leaks to clients.

use std::path::{Component, Path, PathBuf};

use crate::error::AppError;

/// Normalize `relative` against `base`, rejecting absolute paths and any
/// `..` that would escape the base directory.
pub fn normalize_within(base: &Path, relative: &str) -> Result<PathBuf, AppError> {
    let requested = Path::new(relative);
    if requested.is_absolute() {
        return Err(AppError::BadRequest("Invalid path".to_string()));
    }

    let mut normalized = PathBuf::new();
    for component in requested.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(AppError::BadRequest("Invalid path".to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(AppError::BadRequest("Invalid path".to_string()));
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(AppError::BadRequest("Invalid path".to_string()));
    }

    Ok(base.join(normalized))
}

/// First path component of a normalized relative path, for allow-list checks.
pub fn top_level_component(relative: &str) -> Option<String> {
    Path::new(relative).components().find_map(|c| match c {
        Component::Normal(part) => Some(part.to_string_lossy().to_string()),
        _ => None,
    })
}
