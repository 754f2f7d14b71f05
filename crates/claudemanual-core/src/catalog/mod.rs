//! Catalog building
//!
//! Scans a documentation root for markdown-described framework components and
//! assembles normalized catalog entries:
//!
//! - skills under `<root>/skills/<name>/SKILL.md`
//! - commands as flat `<root>/commands/*.md`
//! - agents as flat `<root>/agents/*.md`
//!
//! Every scan is fail-soft: a missing directory yields an empty outcome and a
//! file that cannot be used is recorded as skipped, never an error. Entries
//! are recomputed from disk on every call; there is no cache to invalidate.

pub mod entry;
pub mod frontmatter;
pub mod hooks;
pub mod search;
pub mod sections;
pub mod stage;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub use entry::{AgentEntry, CatalogEntry, CommandEntry, EntryContent, SkillEntry};
pub use frontmatter::{Frontmatter, SkillRefs};
pub use hooks::{HookEntry, HookMap, HookMatcher};
pub use stage::Stage;

/// Why a markdown file was left out of the catalog.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("failed to read file: {0}")]
    Unreadable(String),
    #[error("missing both name and description front-matter keys")]
    MissingIdentity,
}

/// A file excluded from a scan, with its reason.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of one directory scan: entries that made it in, files that did not.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub entries: Vec<CatalogEntry>,
    pub skipped: Vec<SkippedFile>,
}

impl ScanOutcome {
    fn skip(&mut self, path: PathBuf, reason: SkipReason) {
        debug!("Skipping {:?}: {}", path, reason);
        self.skipped.push(SkippedFile { path, reason });
    }
}

/// Filenames excluded from flat command/agent directories by convention.
fn is_excluded_filename(name: &str) -> bool {
    name == "README.md"
        || name.contains("REGISTRY")
        || name.contains("REFERENCE")
        || name.ends_with(".bak")
}

/// Load all skills under `<root>/skills/`.
pub fn load_skills(root: &Path) -> ScanOutcome {
    let dir = root.join("skills");
    let mut outcome = ScanOutcome::default();

    let Some(entries) = read_dir_soft(&dir) else {
        return outcome;
    };

    for dir_entry in entries {
        let path = dir_entry.path();
        if !path.is_dir() {
            continue;
        }
        let skill_file = path.join("SKILL.md");
        if !skill_file.is_file() {
            continue;
        }
        let id = dir_entry.file_name().to_string_lossy().to_string();
        let rel_path = format!("skills/{id}/SKILL.md");

        match read_parsed(&skill_file) {
            Ok(fm) => {
                if let Some(entry) = build_skill(&id, rel_path, &fm) {
                    outcome.entries.push(entry);
                } else {
                    outcome.skip(skill_file, SkipReason::MissingIdentity);
                }
            }
            Err(reason) => outcome.skip(skill_file, reason),
        }
    }

    sort_entries(&mut outcome.entries, &stage::SKILL_STAGE_ORDER);
    outcome
}

/// Load all commands under `<root>/commands/`.
pub fn load_commands(root: &Path) -> ScanOutcome {
    let mut outcome = scan_flat_dir(&root.join("commands"), "commands", build_command);
    sort_entries(&mut outcome.entries, &stage::COMMAND_STAGE_ORDER);
    outcome
}

/// Load all agents under `<root>/agents/`.
pub fn load_agents(root: &Path) -> ScanOutcome {
    let mut outcome = scan_flat_dir(&root.join("agents"), "agents", build_agent);
    sort_entries(&mut outcome.entries, &stage::AGENT_STAGE_ORDER);
    outcome
}

/// Scan a flat directory of `*.md` files with one builder per entity type.
fn scan_flat_dir(
    dir: &Path,
    rel_dir: &str,
    build: fn(&str, String, &Frontmatter) -> Option<CatalogEntry>,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    let Some(entries) = read_dir_soft(dir) else {
        return outcome;
    };

    for dir_entry in entries {
        let path = dir_entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = dir_entry.file_name().to_string_lossy().to_string();
        if !file_name.ends_with(".md") || is_excluded_filename(&file_name) {
            continue;
        }
        let id = file_name.trim_end_matches(".md").to_string();
        let rel_path = format!("{rel_dir}/{file_name}");

        match read_parsed(&path) {
            Ok(fm) => {
                if let Some(entry) = build(&id, rel_path, &fm) {
                    outcome.entries.push(entry);
                } else {
                    outcome.skip(path, SkipReason::MissingIdentity);
                }
            }
            Err(reason) => outcome.skip(path, reason),
        }
    }
    outcome
}

/// Read a directory fail-soft: missing or unreadable yields `None`, logged.
fn read_dir_soft(dir: &Path) -> Option<Vec<fs::DirEntry>> {
    if !dir.is_dir() {
        debug!("Catalog directory does not exist: {:?}", dir);
        return None;
    }
    match fs::read_dir(dir) {
        Ok(entries) => Some(entries.flatten().collect()),
        Err(e) => {
            warn!("Failed to read catalog directory {:?}: {}", dir, e);
            None
        }
    }
}

fn read_parsed(path: &Path) -> Result<Frontmatter, SkipReason> {
    let text = fs::read_to_string(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    Ok(Frontmatter::parse(&text))
}

/// Entries lacking both `description` and `name` are filtered, not errors.
fn identity(id: &str, fm: &Frontmatter) -> Option<(String, String)> {
    let name = fm.scalar("name");
    let description = fm.scalar("description");
    if name.is_none() && description.is_none() {
        return None;
    }
    Some((
        name.map(str::to_string)
            .unwrap_or_else(|| entry::title_from_id(id)),
        description.unwrap_or_default().to_string(),
    ))
}

fn build_skill(id: &str, path: String, fm: &Frontmatter) -> Option<CatalogEntry> {
    let (name, description) = identity(id, fm)?;
    let stage = Stage::from_id(id);

    let content = EntryContent {
        purpose: purpose_or(&fm.body, &description),
        example: sections::synthesize_example(&fm.body, &format!("Load skill: {id}")),
        workflow: sections::workflow_preview(&fm.body),
    };

    Some(CatalogEntry::Skill(SkillEntry {
        id: id.to_string(),
        name,
        description,
        stage,
        path,
        model: fm.scalar("model").map(str::to_string),
        context: fm.scalar("context").map(str::to_string),
        agent: fm.scalar("agent").map(str::to_string),
        allowed_tools: fm.list_any(&["allowed-tools", "allowed_tools"]),
        content,
    }))
}

fn build_command(id: &str, path: String, fm: &Frontmatter) -> Option<CatalogEntry> {
    let (name, description) = identity(id, fm)?;
    let stage = Stage::from_id(id);
    let argument_hint = fm
        .scalar_any(&["argument-hint", "argument_hint"])
        .map(str::to_string);
    let skills = frontmatter::parse_skill_refs(&fm.raw);

    let invocation = match &argument_hint {
        Some(hint) => format!("/{id} {hint}"),
        None => format!("/{id}"),
    };
    let content = EntryContent {
        purpose: purpose_or(&fm.body, &description),
        example: sections::synthesize_example(&fm.body, &invocation),
        workflow: sections::workflow_preview(&fm.body),
    };

    Some(CatalogEntry::Command(CommandEntry {
        id: id.to_string(),
        name,
        description,
        stage,
        path,
        model: fm.scalar("model").map(str::to_string),
        argument_hint,
        allowed_tools: fm.list_any(&["allowed-tools", "allowed_tools"]),
        invokes_skills: skills.merged(),
        orchestrates_agents: fm.list_any(&["agents", "orchestrates-agents"]),
        content,
    }))
}

fn build_agent(id: &str, path: String, fm: &Frontmatter) -> Option<CatalogEntry> {
    let (name, description) = identity(id, fm)?;
    let stage = Stage::from_id(id);
    let skills = frontmatter::parse_skill_refs(&fm.raw);

    // Explicit front-matter color wins; otherwise the fixed stage table.
    let color = fm
        .scalar("color")
        .map(str::to_string)
        .unwrap_or_else(|| stage.color().to_string());

    let content = EntryContent {
        purpose: purpose_or(&fm.body, &description),
        example: sections::synthesize_example(&fm.body, &format!("Spawn the {name} agent")),
        workflow: sections::workflow_preview(&fm.body),
    };

    Some(CatalogEntry::Agent(AgentEntry {
        id: id.to_string(),
        name,
        description,
        stage,
        path,
        model: fm.scalar("model").map(str::to_string),
        checkpoint: fm.scalar("checkpoint").map(str::to_string),
        color,
        tools: fm.list("tools"),
        loads_skills: skills.merged(),
        spawned_by: fm.list_any(&["spawned-by", "spawned_by"]),
        hooks: hooks::parse_hooks(&fm.raw),
        content,
    }))
}

fn purpose_or(body: &str, description: &str) -> String {
    let purpose = sections::extract_purpose(body);
    if purpose.is_empty() {
        description.to_string()
    } else {
        purpose
    }
}

/// Stable two-key sort: stage precedence index, then case-insensitive name.
fn sort_entries(entries: &mut [CatalogEntry], order: &[Stage]) {
    entries.sort_by(|a, b| {
        let sa = stage::precedence(a.stage(), order);
        let sb = stage::precedence(b.stage(), order);
        sa.cmp(&sb)
            .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
    });
}
