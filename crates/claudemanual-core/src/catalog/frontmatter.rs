//! Front-matter line scanner
//!
//! Tokenizes the `---`-delimited header block at the top of a markdown file
//! into key/value pairs, plus the raw header text and the document body.
//!
//! The scanner is deliberately not YAML-spec-accurate: continuation detection
//! is purely indentation/dash-based, so flow scalars outside that pattern do
//! not parse. Existing content relies on this lenient grammar; nested keys
//! (`skills:`, `hooks:`) are handled by dedicated sub-parsers over the raw
//! header text instead.

use std::collections::BTreeMap;

/// A parsed front-matter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterValue {
    /// Plain scalar, surrounding quotes stripped.
    Scalar(String),
    /// Sequence from an inline `[a, b]` flow list or a dash block.
    List(Vec<String>),
}

/// Result of scanning a markdown document.
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    fields: BTreeMap<String, FrontmatterValue>,
    /// Raw header text between the `---` delimiters, consumed by sub-parsers.
    pub raw: String,
    /// Document body after the closing delimiter.
    pub body: String,
}

impl Frontmatter {
    /// Scan raw file text. A file without a leading `---` block yields empty
    /// fields and the whole text as body.
    pub fn parse(text: &str) -> Self {
        let Some((raw, body)) = split_frontmatter(text) else {
            return Self {
                fields: BTreeMap::new(),
                raw: String::new(),
                body: text.to_string(),
            };
        };

        let fields = scan_fields(&raw);
        Self { fields, raw, body }
    }

    /// Look up a scalar value by key.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(FrontmatterValue::Scalar(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Look up a scalar under any of the given keys (kebab/snake variants).
    pub fn scalar_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.scalar(k))
    }

    /// Look up a list value by key. A scalar value is split on commas so that
    /// `allowed-tools: Read, Grep` style lines still yield a list.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.fields.get(key) {
            Some(FrontmatterValue::List(items)) => items.clone(),
            Some(FrontmatterValue::Scalar(s)) => split_comma_list(s),
            None => Vec::new(),
        }
    }

    /// Look up a list under any of the given keys.
    pub fn list_any(&self, keys: &[&str]) -> Vec<String> {
        for key in keys {
            let items = self.list(key);
            if !items.is_empty() {
                return items;
            }
        }
        Vec::new()
    }

    /// Whether the key appeared at all, even with an empty value.
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

/// Split text into raw header and body when a `---` block is present.
fn split_frontmatter(text: &str) -> Option<(String, String)> {
    let mut lines = text.lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return None;
    }

    let mut header = Vec::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        header.push(line);
    }
    if !closed {
        return None;
    }

    let body: Vec<&str> = lines.collect();
    Some((header.join("\n"), body.join("\n")))
}

/// Line-scan the header block into a flat key map. Last write per key wins.
fn scan_fields(raw: &str) -> BTreeMap<String, FrontmatterValue> {
    let mut fields = BTreeMap::new();
    let mut current_key: Option<String> = None;
    let mut scalar = String::new();
    let mut items: Vec<String> = Vec::new();

    for line in raw.lines() {
        let indent = line.len() - line.trim_start().len();
        let trimmed = line.trim();

        if indent == 0 {
            if let Some(colon) = line.find(':') {
                flush_field(&mut fields, &mut current_key, &mut scalar, &mut items);
                current_key = Some(line[..colon].trim().to_string());
                scalar = strip_quotes(line[colon + 1..].trim()).to_string();
            }
            // zero-indent line without a colon: not a key, ignored
        } else if let Some(item) = trimmed.strip_prefix("- ") {
            if current_key.is_some() {
                items.push(strip_quotes(item.trim()).to_string());
            }
        } else if indent >= 2 && current_key.is_some() && !trimmed.is_empty() {
            // Continuation of the current scalar, joined with a single space.
            if !scalar.is_empty() {
                scalar.push(' ');
            }
            scalar.push_str(trimmed);
        }
    }
    flush_field(&mut fields, &mut current_key, &mut scalar, &mut items);
    fields
}

fn flush_field(
    fields: &mut BTreeMap<String, FrontmatterValue>,
    key: &mut Option<String>,
    scalar: &mut String,
    items: &mut Vec<String>,
) {
    let Some(key) = key.take() else {
        scalar.clear();
        items.clear();
        return;
    };

    let value = if !items.is_empty() {
        FrontmatterValue::List(std::mem::take(items))
    } else if scalar.starts_with('[') && scalar.ends_with(']') {
        FrontmatterValue::List(split_comma_list(&scalar[1..scalar.len() - 1]))
    } else {
        FrontmatterValue::Scalar(std::mem::take(scalar))
    };
    scalar.clear();
    items.clear();
    fields.insert(key, value);
}

/// Strip one layer of matching surrounding quotes.
pub fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if s.len() >= 2 {
        let bytes = s.as_bytes();
        if (bytes[0] == b'"' && bytes[s.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[s.len() - 1] == b'\'')
        {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn split_comma_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|part| strip_quotes(part.trim()).to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Skill references declared under a `skills:` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillRefs {
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

impl SkillRefs {
    /// Required then optional, in declaration order.
    pub fn merged(&self) -> Vec<String> {
        let mut all = self.required.clone();
        all.extend(self.optional.iter().cloned());
        all
    }
}

/// Parse the top-level `skills:` block out of raw header text.
///
/// The block ends at the first zero-indent line containing a colon (the next
/// top-level key). `required:` / `optional:` switch the active list; dash
/// lines append to it in order.
pub fn parse_skill_refs(raw: &str) -> SkillRefs {
    #[derive(PartialEq)]
    enum Active {
        None,
        Required,
        Optional,
    }

    let mut refs = SkillRefs::default();
    let mut in_block = false;
    let mut active = Active::None;

    for line in raw.lines() {
        if !in_block {
            if line.trim_end() == "skills:" {
                in_block = true;
            }
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        if indent == 0 && line.contains(':') {
            break;
        }

        let trimmed = line.trim();
        match trimmed {
            "required:" => active = Active::Required,
            "optional:" => active = Active::Optional,
            _ => {
                if let Some(item) = trimmed.strip_prefix("- ") {
                    let item = strip_quotes(item.trim()).to_string();
                    match active {
                        Active::Required => refs.required.push(item),
                        Active::Optional => refs.optional.push(item),
                        Active::None => {}
                    }
                }
            }
        }
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_simple_pairs_with_trimming() {
        let fm = Frontmatter::parse("---\nfoo:   bar  \nname: test-skill\n---\nbody");
        assert_eq!(fm.scalar("foo"), Some("bar"));
        assert_eq!(fm.scalar("name"), Some("test-skill"));
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn missing_frontmatter_is_all_body() {
        let fm = Frontmatter::parse("# Title\n\nNo header here.");
        assert!(!fm.has("name"));
        assert!(fm.body.contains("# Title"));
    }

    #[test]
    fn unterminated_frontmatter_is_all_body() {
        let fm = Frontmatter::parse("---\nname: x\nno closing delimiter");
        assert!(!fm.has("name"));
        assert!(fm.body.starts_with("---"));
    }

    #[test]
    fn continuation_lines_join_with_single_space() {
        let text = "---\ndescription: first part\n  second part\n  third part\n---\n";
        let fm = Frontmatter::parse(text);
        assert_eq!(
            fm.scalar("description"),
            Some("first part second part third part")
        );
    }

    #[test]
    fn dash_block_becomes_list() {
        let text = "---\ntools:\n  - Read\n  - Grep\n---\n";
        let fm = Frontmatter::parse(text);
        assert_eq!(fm.list("tools"), vec!["Read", "Grep"]);
    }

    #[test]
    fn inline_flow_list_becomes_list() {
        let fm = Frontmatter::parse("---\ntools: [Read, Write, Bash]\n---\n");
        assert_eq!(fm.list("tools"), vec!["Read", "Write", "Bash"]);
    }

    #[test]
    fn comma_scalar_splits_as_list() {
        let fm = Frontmatter::parse("---\nallowed-tools: Read, Grep, Glob\n---\n");
        assert_eq!(fm.list("allowed-tools"), vec!["Read", "Grep", "Glob"]);
    }

    #[test]
    fn last_write_per_key_wins() {
        let fm = Frontmatter::parse("---\nmodel: haiku\nmodel: sonnet\n---\n");
        assert_eq!(fm.scalar("model"), Some("sonnet"));
    }

    #[test]
    fn quotes_are_stripped() {
        let fm = Frontmatter::parse("---\ndescription: \"Quoted text\"\ncolor: 'red'\n---\n");
        assert_eq!(fm.scalar("description"), Some("Quoted text"));
        assert_eq!(fm.scalar("color"), Some("red"));
    }

    #[test]
    fn bare_key_registers_as_present() {
        let fm = Frontmatter::parse("---\nhooks:\nname: x\n---\n");
        assert!(fm.has("hooks"));
        assert_eq!(fm.scalar("name"), Some("x"));
    }

    #[test]
    fn skill_refs_absent_block() {
        assert_eq!(parse_skill_refs("name: x\n"), SkillRefs::default());
    }

    #[test]
    fn skill_refs_required_and_optional_preserve_order() {
        let raw = "skills:\n  required:\n    - alpha\n    - beta\n  optional:\n    - gamma\nmodel: sonnet\n";
        let refs = parse_skill_refs(raw);
        assert_eq!(refs.required, vec!["alpha", "beta"]);
        assert_eq!(refs.optional, vec!["gamma"]);
        assert_eq!(refs.merged(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn skill_refs_block_ends_at_next_top_level_key() {
        let raw = "skills:\n  required:\n    - alpha\nagents:\n  - beta\n";
        let refs = parse_skill_refs(raw);
        assert_eq!(refs.required, vec!["alpha"]);
        assert!(refs.optional.is_empty());
    }
}
