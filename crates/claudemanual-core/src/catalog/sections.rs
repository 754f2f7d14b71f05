//! Body section extractor
//!
//! Regex-based slicer that pulls named markdown sections out of a document
//! body for display. An `##`-level heading is tried first, then `###`;
//! matching is case-insensitive and the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest workflow text carried into a catalog entry.
const WORKFLOW_PREVIEW_CHARS: usize = 500;

/// Fallback shown when a document has no workflow-like section.
pub const WORKFLOW_FALLBACK: &str = "No workflow documented.";

static H1_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#\s+\S").expect("valid H1 regex"));

/// Extract a named section's text with its heading line stripped.
///
/// `names` is an alternation pattern such as `Workflow|Execution|Process`.
/// Returns an empty string when no section matches.
pub fn extract_section(body: &str, names: &str) -> String {
    for (open, close) in [(r"##", r"\n##\s"), (r"###", r"\n#{2,3}\s")] {
        let pattern = format!(r"(?is)(?m)^{open}\s+(?:{names})[^\n]*\n(.*?)(?:{close}|\z)");
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        if let Some(caps) = re.captures(body) {
            if let Some(section) = caps.get(1) {
                return section.as_str().trim().to_string();
            }
        }
    }
    String::new()
}

/// First non-heading paragraph immediately following the H1 title line.
pub fn extract_purpose(body: &str) -> String {
    let Some(h1) = H1_LINE.find(body) else {
        return String::new();
    };

    let after_title = match body[h1.start()..].find('\n') {
        Some(offset) => &body[h1.start() + offset + 1..],
        None => return String::new(),
    };

    let mut paragraph: Vec<&str> = Vec::new();
    for line in after_title.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if paragraph.is_empty() {
                continue;
            }
            break;
        }
        if trimmed.starts_with('#') {
            break;
        }
        paragraph.push(trimmed);
    }
    paragraph.join(" ")
}

/// Workflow preview: first 500 characters of a workflow-like section, or the
/// fixed fallback string.
pub fn workflow_preview(body: &str) -> String {
    let section = extract_section(body, "Workflow|Execution|Process");
    if section.is_empty() {
        return WORKFLOW_FALLBACK.to_string();
    }
    section.chars().take(WORKFLOW_PREVIEW_CHARS).collect()
}

/// Synthesize a short usage example for a catalog entry.
///
/// Prefers the first bullet items of a when-to-use/capabilities list; falls
/// back to the given invocation template.
pub fn synthesize_example(body: &str, invocation: &str) -> String {
    let section = extract_section(body, "When to Use|Capabilities|Use Cases|Examples?");
    let bullets: Vec<&str> = section
        .lines()
        .filter_map(|line| line.trim().strip_prefix("- "))
        .take(3)
        .collect();

    if bullets.is_empty() {
        invocation.to_string()
    } else {
        bullets.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Discovery Researcher

Maps the problem space before any solution work begins.

## Purpose

Understand user needs.

## Workflow

1. Gather signals
2. Cluster findings

## Notes

Unrelated trailing section.
";

    #[test]
    fn extracts_h2_section_until_next_heading() {
        let section = extract_section(DOC, "Workflow|Execution|Process");
        assert_eq!(section, "1. Gather signals\n2. Cluster findings");
    }

    #[test]
    fn section_match_is_case_insensitive() {
        let section = extract_section(DOC, "workflow");
        assert!(section.starts_with("1. Gather signals"));
    }

    #[test]
    fn missing_section_is_empty() {
        assert_eq!(extract_section(DOC, "Checklist"), "");
    }

    #[test]
    fn falls_back_to_h3_heading() {
        let body = "# T\n\n### Process\n\ndeep steps\n\n## Other\n\nx\n";
        assert_eq!(extract_section(body, "Workflow|Execution|Process"), "deep steps");
    }

    #[test]
    fn purpose_is_first_paragraph_after_h1() {
        assert_eq!(
            extract_purpose(DOC),
            "Maps the problem space before any solution work begins."
        );
    }

    #[test]
    fn purpose_joins_wrapped_lines() {
        let body = "# T\n\nfirst line\nsecond line\n\nnext paragraph\n";
        assert_eq!(extract_purpose(body), "first line second line");
    }

    #[test]
    fn purpose_empty_without_h1() {
        assert_eq!(extract_purpose("plain text, no title"), "");
    }

    #[test]
    fn workflow_preview_truncates_to_500_chars() {
        let long = format!("# T\n\n## Workflow\n\n{}\n", "x".repeat(800));
        assert_eq!(workflow_preview(&long).chars().count(), 500);
    }

    #[test]
    fn workflow_preview_fallback() {
        assert_eq!(workflow_preview("# T\n\nno sections"), WORKFLOW_FALLBACK);
    }

    #[test]
    fn example_prefers_when_to_use_bullets() {
        let body = "# T\n\n## When to Use\n\n- before building\n- after research\n";
        assert_eq!(
            synthesize_example(body, "/cmd <args>"),
            "before building\nafter research"
        );
    }

    #[test]
    fn example_falls_back_to_invocation() {
        assert_eq!(synthesize_example("# T\n\nbody", "/cmd <args>"), "/cmd <args>");
    }
}
