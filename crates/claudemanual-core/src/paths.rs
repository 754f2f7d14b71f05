//! Centralized path utilities
//!
//! All application paths in one place for consistency

use std::path::PathBuf;

/// Directory name under the user's home for application state.
const CONFIG_DIR_NAME: &str = ".claudemanual";

/// Environment variable overriding the documentation root.
pub const DOCS_ROOT_ENV: &str = "CLAUDEMANUAL_ROOT";

/// Get the claudemanual config directory (~/.claudemanual)
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Get the preferences database path (~/.claudemanual/claudemanual.db)
pub fn preferences_db_path() -> PathBuf {
    config_dir().join("claudemanual.db")
}

/// Resolve the documentation root directory.
///
/// `CLAUDEMANUAL_ROOT` wins when set; otherwise the current working directory.
pub fn resolve_docs_root() -> PathBuf {
    if let Ok(root) = std::env::var(DOCS_ROOT_ENV) {
        if !root.trim().is_empty() {
            return PathBuf::from(root);
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
