//! Hooks sub-parser
//!
//! Agent front-matter may declare lifecycle hooks as nested YAML the generic
//! line scanner cannot flatten:
//!
//! ```yaml
//! hooks:
//!   PreToolUse:
//!     - matcher: "Bash"
//!       once: true
//!       hooks:
//!         - type: command
//!           command: >-
//!             echo pre-tool
//!             check
//! ```
//!
//! This module re-scans the raw header text with a stateful line machine.
//! Malformed or incomplete trailing blocks are silently dropped; existing
//! content relies on that leniency, so the parser never errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::frontmatter::strip_quotes;

/// Hook-type name (e.g. `PreToolUse`, `Stop`) to its matcher list.
/// Hook types are open-ended strings, not an enum.
pub type HookMap = BTreeMap<String, Vec<HookMatcher>>;

/// One matcher block under a hook type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookMatcher {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub once: Option<bool>,
    pub hooks: Vec<HookEntry>,
}

/// A single registered hook command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub command: String,
}

/// Accumulator for the entry currently being scanned.
#[derive(Default)]
struct PendingEntry {
    entry_type: Option<String>,
    inline_command: Option<String>,
    command_lines: Vec<String>,
    accumulating: bool,
}

impl PendingEntry {
    /// Emit the entry if its `type` was seen; partial entries are discarded.
    fn flush_into(&mut self, matcher: &mut HookMatcher) {
        if let Some(entry_type) = self.entry_type.take() {
            let command = match self.inline_command.take() {
                Some(cmd) => cmd,
                None => self.command_lines.join(" "),
            };
            matcher.hooks.push(HookEntry {
                entry_type,
                command,
            });
        }
        self.inline_command = None;
        self.command_lines.clear();
        self.accumulating = false;
    }

    fn reset(&mut self) {
        self.entry_type = None;
        self.inline_command = None;
        self.command_lines.clear();
        self.accumulating = false;
    }
}

/// Parse the top-level `hooks:` block out of raw header text.
///
/// Returns `None` when the key is absent so callers can distinguish "no hooks"
/// from "empty hooks".
pub fn parse_hooks(raw: &str) -> Option<HookMap> {
    let mut lines = raw.lines();
    lines.by_ref().find(|line| line.trim_end() == "hooks:")?;

    let mut map = HookMap::new();
    let mut group: Option<String> = None;
    let mut matchers: Vec<HookMatcher> = Vec::new();
    let mut matcher: Option<HookMatcher> = None;
    let mut pending = PendingEntry::default();

    for line in lines {
        let indent = line.len() - line.trim_start().len();
        let trimmed = line.trim();

        // A new top-level key ends the whole hooks section.
        if indent == 0 && line.contains(':') {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }

        // 2-space indented `Name:` starts a new hook-type group.
        if indent == 2 && trimmed.ends_with(':') && !trimmed.starts_with('-') {
            flush_matcher(&mut matcher, &mut matchers, &mut pending);
            flush_group(&mut map, &mut group, &mut matchers);
            group = Some(trimmed.trim_end_matches(':').to_string());
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("- ") {
            if group.is_none() {
                continue;
            }
            if rest.starts_with("matcher:") || rest == "matcher:" || rest.starts_with("hooks:") {
                // A dash item opening `matcher:` or `hooks:` begins a fresh matcher.
                flush_matcher(&mut matcher, &mut matchers, &mut pending);
                let mut fresh = HookMatcher::default();
                if let Some(value) = rest.strip_prefix("matcher:") {
                    let value = strip_quotes(value.trim());
                    if !value.is_empty() {
                        fresh.matcher = Some(value.to_string());
                    }
                }
                matcher = Some(fresh);
            } else if let Some(value) = rest.strip_prefix("type:") {
                if let Some(current) = matcher.as_mut() {
                    pending.flush_into(current);
                    pending.entry_type = Some(strip_quotes(value.trim()).to_string());
                }
            }
            continue;
        }

        // Lines indented >=6 while a matcher is active are matcher-internal.
        if indent >= 6 {
            let Some(current) = matcher.as_mut() else {
                continue;
            };
            if let Some(value) = trimmed.strip_prefix("once:") {
                current.once = Some(value.trim() == "true");
            } else if let Some(value) = trimmed.strip_prefix("command:") {
                let value = value.trim();
                if value == ">-" || value == ">" {
                    pending.accumulating = true;
                    pending.command_lines.clear();
                } else {
                    pending.inline_command = Some(strip_quotes(value).to_string());
                }
            } else if pending.accumulating && !trimmed.contains(':') && !trimmed.starts_with('-') {
                // Block-scalar continuation. A continuation containing a colon
                // is NOT appended; existing content depends on this lenient
                // parse, so the guard stays as-is.
                pending.command_lines.push(trimmed.to_string());
            }
        }
    }

    flush_matcher(&mut matcher, &mut matchers, &mut pending);
    flush_group(&mut map, &mut group, &mut matchers);
    Some(map)
}

fn flush_matcher(
    matcher: &mut Option<HookMatcher>,
    matchers: &mut Vec<HookMatcher>,
    pending: &mut PendingEntry,
) {
    if let Some(mut current) = matcher.take() {
        pending.flush_into(&mut current);
        matchers.push(current);
    } else {
        pending.reset();
    }
}

fn flush_group(map: &mut HookMap, group: &mut Option<String>, matchers: &mut Vec<HookMatcher>) {
    if let Some(name) = group.take() {
        map.insert(name, std::mem::take(matchers));
    } else {
        matchers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_hooks_key_is_none() {
        assert_eq!(parse_hooks("name: x\ndescription: y\n"), None);
    }

    #[test]
    fn empty_hooks_block_is_some_empty() {
        let map = parse_hooks("hooks:\nname: x\n").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn single_matcher_with_two_entries_and_multiline_command() {
        let raw = "\
hooks:
  PreToolUse:
    - matcher: \"Bash\"
      hooks:
        - type: command
          command: echo first
        - type: command
          command: >-
            echo second part-a
            part-b
name: x
";
        let map = parse_hooks(raw).unwrap();
        let matchers = &map["PreToolUse"];
        assert_eq!(matchers.len(), 1);
        assert_eq!(matchers[0].matcher.as_deref(), Some("Bash"));
        assert_eq!(matchers[0].hooks.len(), 2);
        assert_eq!(matchers[0].hooks[0].command, "echo first");
        assert_eq!(matchers[0].hooks[1].entry_type, "command");
        assert_eq!(matchers[0].hooks[1].command, "echo second part-a part-b");
    }

    #[test]
    fn once_flag_parses_from_literal_true() {
        let raw = "\
hooks:
  Stop:
    - matcher: \"*\"
      once: true
      hooks:
        - type: command
          command: cleanup.sh
";
        let map = parse_hooks(raw).unwrap();
        let matchers = &map["Stop"];
        assert_eq!(matchers[0].once, Some(true));
        assert_eq!(matchers[0].hooks[0].command, "cleanup.sh");
    }

    #[test]
    fn multiple_hook_type_groups() {
        let raw = "\
hooks:
  PreToolUse:
    - matcher: \"Write\"
      hooks:
        - type: command
          command: pre.sh
  PostToolUse:
    - matcher: \"Write\"
      hooks:
        - type: command
          command: post.sh
";
        let map = parse_hooks(raw).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["PreToolUse"][0].hooks[0].command, "pre.sh");
        assert_eq!(map["PostToolUse"][0].hooks[0].command, "post.sh");
    }

    #[test]
    fn dash_hooks_item_starts_matcher_without_pattern() {
        let raw = "\
hooks:
  SessionStart:
    - hooks:
        - type: command
          command: init.sh
";
        let map = parse_hooks(raw).unwrap();
        let matchers = &map["SessionStart"];
        assert_eq!(matchers.len(), 1);
        assert_eq!(matchers[0].matcher, None);
        assert_eq!(matchers[0].hooks[0].command, "init.sh");
    }

    #[test]
    fn incomplete_trailing_entry_is_dropped() {
        // Entry never declares a `type`, so it is discarded at end of scan.
        let raw = "\
hooks:
  PreToolUse:
    - matcher: \"Bash\"
      hooks:
";
        let map = parse_hooks(raw).unwrap();
        let matchers = &map["PreToolUse"];
        assert_eq!(matchers.len(), 1);
        assert!(matchers[0].hooks.is_empty());
    }

    #[test]
    fn continuation_line_with_colon_is_excluded() {
        // Block-scalar continuations containing a colon are skipped;
        // stored commands rely on this.
        let raw = "\
hooks:
  PreToolUse:
    - matcher: \"Bash\"
      hooks:
        - type: command
          command: >-
            echo start
            echo \"a: b\"
            echo end
";
        let map = parse_hooks(raw).unwrap();
        let entry = &map["PreToolUse"][0].hooks[0];
        assert_eq!(entry.command, "echo start echo end");
    }

    #[test]
    fn section_ends_at_next_top_level_key() {
        let raw = "\
hooks:
  PreToolUse:
    - matcher: \"Bash\"
      hooks:
        - type: command
          command: run.sh
model: sonnet
  NotAHookGroup:
";
        let map = parse_hooks(raw).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["PreToolUse"][0].hooks[0].command, "run.sh");
    }
}
