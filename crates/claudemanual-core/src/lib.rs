//! Core library for ClaudeManual
//!
//! ClaudeManual renders a tree of markdown-described framework components
//! (skills, commands, agents) into a browsable catalog. This crate owns the
//! parsing and persistence logic behind that:
//!
//! - [`catalog`] — front-matter scanning, body section extraction, stage
//!   classification, catalog building, and search
//! - [`storage`] — SQLite-backed user preference persistence
//! - [`watcher`] — placeholder documentation watcher (no live I/O)
//! - [`paths`] — centralized application paths

pub mod catalog;
pub mod paths;
pub mod storage;
pub mod watcher;
