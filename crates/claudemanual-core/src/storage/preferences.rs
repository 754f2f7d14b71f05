//! User preference store
//!
//! All user-specific UI state lives in one JSON document under a single key.
//! Reads never fail: a missing or corrupt document yields the defaults.
//! Writes are wholesale (last-writer-wins); there is no cross-session merge.
//!
//! The store is an explicitly constructed service passed by reference to
//! handlers; it keeps no module-level state.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::database::Database;

/// Storage key for the main preference document.
pub const PREFERENCES_KEY: &str = "claudemanual-preferences";

/// Most recent queries kept in the search history.
const SEARCH_HISTORY_LIMIT: usize = 10;

/// UI color scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// The persisted preference document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub theme: Theme,
    /// Favorited entry ids; insertion order is display order, no duplicates.
    pub favorites: Vec<String>,
    pub collapsed_nodes: Vec<String>,
    pub last_viewed: Option<String>,
    /// Most-recent-first, capped, de-duplicated by moving repeats to front.
    pub search_history: Vec<String>,
    pub stage_filter: Vec<String>,
    pub type_filter: Vec<String>,
    /// User-authored tags per entry id. Not cleared by `clear_filters`.
    pub component_tags: HashMap<String, Vec<String>>,
    pub tag_filter: Vec<String>,
    /// User-overridden stages per entry id. Not cleared by `clear_filters`.
    pub component_stages: HashMap<String, Vec<String>>,
}

/// Preference persistence service.
pub struct PreferenceStore {
    db: Database,
}

impl PreferenceStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the store backed by the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(Database::new(path)?))
    }

    /// Read the preference document. Never fails: missing or corrupt data
    /// yields the default document.
    pub fn get(&self) -> UserPreferences {
        let raw = match self.db.get(PREFERENCES_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read preferences, using defaults: {}", e);
                return UserPreferences::default();
            }
        };
        match raw {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Failed to parse preferences JSON, using defaults: {}", e);
                UserPreferences::default()
            }),
            None => UserPreferences::default(),
        }
    }

    /// Shallow-merge a partial JSON object into the stored document: each
    /// top-level key in `partial` overwrites the stored key wholesale.
    ///
    /// Keys are applied one at a time and re-validated against the schema,
    /// so a malformed field is dropped without touching the rest of the
    /// document.
    pub fn save(&self, partial: &Value) -> Result<UserPreferences> {
        let mut merged = self.get();
        if let Some(updates) = partial.as_object() {
            for (key, value) in updates {
                let mut doc = serde_json::to_value(&merged)?;
                if let Some(target) = doc.as_object_mut() {
                    target.insert(key.clone(), value.clone());
                }
                match serde_json::from_value(doc) {
                    Ok(next) => merged = next,
                    Err(e) => warn!("Ignoring invalid preference field {}: {}", key, e),
                }
            }
        }
        self.write(&merged)?;
        Ok(merged)
    }

    /// Replace the document wholesale.
    pub fn replace(&self, prefs: &UserPreferences) -> Result<()> {
        self.write(prefs)
    }

    /// Remove the stored document entirely; the next read yields defaults.
    pub fn reset(&self) -> Result<()> {
        self.db.delete(PREFERENCES_KEY)
    }

    /// Add an id to favorites if not already present.
    pub fn add_favorite(&self, id: &str) -> Result<UserPreferences> {
        let mut prefs = self.get();
        if !prefs.favorites.iter().any(|f| f == id) {
            prefs.favorites.push(id.to_string());
        }
        self.write(&prefs)?;
        Ok(prefs)
    }

    pub fn remove_favorite(&self, id: &str) -> Result<UserPreferences> {
        let mut prefs = self.get();
        prefs.favorites.retain(|f| f != id);
        self.write(&prefs)?;
        Ok(prefs)
    }

    pub fn toggle_favorite(&self, id: &str) -> Result<UserPreferences> {
        let prefs = self.get();
        if prefs.favorites.iter().any(|f| f == id) {
            self.remove_favorite(id)
        } else {
            self.add_favorite(id)
        }
    }

    /// Record a search query: most-recent-first, repeats move to the front,
    /// history capped.
    pub fn add_search_history(&self, query: &str) -> Result<UserPreferences> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(self.get());
        }
        let mut prefs = self.get();
        prefs.search_history.retain(|q| q != query);
        prefs.search_history.insert(0, query.to_string());
        prefs.search_history.truncate(SEARCH_HISTORY_LIMIT);
        self.write(&prefs)?;
        Ok(prefs)
    }

    /// Toggle a stage in the stage filter.
    pub fn toggle_stage_filter(&self, stage: &str) -> Result<UserPreferences> {
        let mut prefs = self.get();
        if prefs.stage_filter.iter().any(|s| s == stage) {
            prefs.stage_filter.retain(|s| s != stage);
        } else {
            prefs.stage_filter.push(stage.to_string());
        }
        self.write(&prefs)?;
        Ok(prefs)
    }

    /// Clear the stage/type/tag filters. User-authored `component_tags` and
    /// `component_stages` are intentionally left untouched.
    pub fn clear_filters(&self) -> Result<UserPreferences> {
        let mut prefs = self.get();
        prefs.stage_filter.clear();
        prefs.type_filter.clear();
        prefs.tag_filter.clear();
        self.write(&prefs)?;
        Ok(prefs)
    }

    /// Raw access for per-view keys (sidebar widths, workflow view state).
    pub fn get_raw(&self, key: &str) -> Option<String> {
        match self.db.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read key {}: {}", key, e);
                None
            }
        }
    }

    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.db.set(key, value)
    }

    fn write(&self, prefs: &UserPreferences) -> Result<()> {
        let raw = serde_json::to_string(prefs)?;
        self.db.set(PREFERENCES_KEY, &raw)
    }
}
