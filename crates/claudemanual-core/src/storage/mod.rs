//! Persistence layer
//!
//! SQLite-based key-value storage for user preferences and per-view UI state.

mod database;
mod preferences;

pub use database::Database;
pub use preferences::{PreferenceStore, Theme, UserPreferences, PREFERENCES_KEY};
