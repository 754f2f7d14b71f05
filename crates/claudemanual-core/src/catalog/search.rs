//! Catalog search
//!
//! Case-insensitive substring matching with a fixed field weighting. The
//! corpus is tens of entries, so a linear scan per query is fine.

use super::entry::CatalogEntry;

/// Most results a single query returns.
const MAX_RESULTS: usize = 50;

const NAME_WEIGHT: u32 = 10;
const ID_WEIGHT: u32 = 8;
const DESCRIPTION_WEIGHT: u32 = 5;
const STAGE_WEIGHT: u32 = 2;

/// Score one entry against a lowercased query; zero means no match.
fn score(entry: &CatalogEntry, query: &str) -> u32 {
    let mut score = 0;
    if entry.name().to_lowercase().contains(query) {
        score += NAME_WEIGHT;
    }
    if entry.id().to_lowercase().contains(query) {
        score += ID_WEIGHT;
    }
    if entry.description().to_lowercase().contains(query) {
        score += DESCRIPTION_WEIGHT;
    }
    if entry.stage().as_str().contains(query) {
        score += STAGE_WEIGHT;
    }
    score
}

/// Search the catalog. An empty query returns no results, not the full set.
pub fn search(query: &str, entries: &[CatalogEntry]) -> Vec<CatalogEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(u32, &CatalogEntry)> = entries
        .iter()
        .filter_map(|entry| {
            let s = score(entry, &query);
            (s > 0).then_some((s, entry))
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.1.name().to_lowercase().cmp(&b.1.name().to_lowercase()))
    });
    scored
        .into_iter()
        .take(MAX_RESULTS)
        .map(|(_, entry)| entry.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::{EntryContent, SkillEntry};
    use crate::catalog::stage::Stage;

    fn skill(id: &str, name: &str, description: &str) -> CatalogEntry {
        CatalogEntry::Skill(SkillEntry {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            stage: Stage::from_id(id),
            path: format!("skills/{id}/SKILL.md"),
            model: None,
            context: None,
            agent: None,
            allowed_tools: vec![],
            content: EntryContent::default(),
        })
    }

    #[test]
    fn empty_query_returns_nothing() {
        let corpus = vec![skill("discovery-jtbd", "Discovery Jtbd", "d")];
        assert!(search("", &corpus).is_empty());
        assert!(search("   ", &corpus).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive_across_fields() {
        let corpus = vec![
            skill("discovery-jtbd", "Discovery Jtbd", "Jobs to be done mapping"),
            skill("kaizen-loop", "Kaizen Loop", "Improvement cycle"),
        ];
        let results = search("JTBD", &corpus);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id(), "discovery-jtbd");
    }

    #[test]
    fn name_matches_outrank_description_matches() {
        let corpus = vec![
            skill("utility-a", "Helper", "mentions planning in passing"),
            skill("utility-b", "Planning", "unrelated"),
        ];
        let results = search("planning", &corpus);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name(), "Planning");
    }

    #[test]
    fn stage_name_matches_score_low_but_match() {
        let corpus = vec![skill("discovery-jtbd", "X", "y")];
        let results = search("discovery", &corpus);
        // id + stage both contain "discovery"
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn results_are_capped_at_fifty() {
        let corpus: Vec<CatalogEntry> = (0..80)
            .map(|i| skill(&format!("utility-{i}"), &format!("Utility {i}"), "tool"))
            .collect();
        assert_eq!(search("utility", &corpus).len(), 50);
    }
}
