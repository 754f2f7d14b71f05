//! Catalog entry types
//!
//! Normalized, displayable records for framework components. Entries are
//! derived from markdown files on every catalog request and never mutated in
//! place.

use serde::Serialize;

use super::hooks::HookMap;
use super::stage::Stage;

/// Derived display payload common to all entry kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryContent {
    pub purpose: String,
    pub example: String,
    pub workflow: String,
}

/// A skill record (`<root>/skills/<name>/SKILL.md`).
#[derive(Debug, Clone, Serialize)]
pub struct SkillEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub stage: Stage,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    pub allowed_tools: Vec<String>,
    pub content: EntryContent,
}

/// A command record (`<root>/commands/*.md`).
#[derive(Debug, Clone, Serialize)]
pub struct CommandEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub stage: Stage,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument_hint: Option<String>,
    pub allowed_tools: Vec<String>,
    /// Required and optional skill references, merged in declaration order.
    pub invokes_skills: Vec<String>,
    pub orchestrates_agents: Vec<String>,
    pub content: EntryContent,
}

/// An agent record (`<root>/agents/*.md`).
#[derive(Debug, Clone, Serialize)]
pub struct AgentEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub stage: Stage,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<String>,
    pub color: String,
    pub tools: Vec<String>,
    pub loads_skills: Vec<String>,
    pub spawned_by: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hooks: Option<HookMap>,
    pub content: EntryContent,
}

/// One normalized framework component.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogEntry {
    Skill(SkillEntry),
    Command(CommandEntry),
    Agent(AgentEntry),
}

impl CatalogEntry {
    pub fn id(&self) -> &str {
        match self {
            CatalogEntry::Skill(e) => &e.id,
            CatalogEntry::Command(e) => &e.id,
            CatalogEntry::Agent(e) => &e.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CatalogEntry::Skill(e) => &e.name,
            CatalogEntry::Command(e) => &e.name,
            CatalogEntry::Agent(e) => &e.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            CatalogEntry::Skill(e) => &e.description,
            CatalogEntry::Command(e) => &e.description,
            CatalogEntry::Agent(e) => &e.description,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            CatalogEntry::Skill(e) => e.stage,
            CatalogEntry::Command(e) => e.stage,
            CatalogEntry::Agent(e) => e.stage,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            CatalogEntry::Skill(e) => &e.path,
            CatalogEntry::Command(e) => &e.path,
            CatalogEntry::Agent(e) => &e.path,
        }
    }
}

/// Title-case an id when no explicit `name` front-matter field exists:
/// `discovery-jtbd` becomes `Discovery Jtbd`.
pub fn title_from_id(id: &str) -> String {
    let mut title = String::with_capacity(id.len());
    for part in id.split('-').filter(|part| !part.is_empty()) {
        if !title.is_empty() {
            title.push(' ');
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            title.extend(first.to_uppercase());
            title.push_str(chars.as_str());
        }
    }
    title
}
