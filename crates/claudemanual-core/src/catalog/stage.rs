//! Stage classification
//!
//! Every catalog entry gets a lifecycle-phase stage derived purely from its
//! id prefix. Classification is a pure function: same id, same stage.

use serde::{Deserialize, Serialize};

/// Fixed lifecycle-phase enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "discovery")]
    Discovery,
    #[serde(rename = "prototype")]
    Prototype,
    #[serde(rename = "product-specs")]
    ProductSpecs,
    #[serde(rename = "sol-arch")]
    SolArch,
    #[serde(rename = "implementation")]
    Implementation,
    #[serde(rename = "quality")]
    Quality,
    #[serde(rename = "grc")]
    Grc,
    #[serde(rename = "process")]
    Process,
    #[serde(rename = "reflexion")]
    Reflexion,
    #[serde(rename = "traceability")]
    Traceability,
    #[serde(rename = "kaizen")]
    Kaizen,
    #[serde(rename = "rules")]
    Rules,
    #[serde(rename = "security")]
    Security,
    #[serde(rename = "shared")]
    Shared,
    #[serde(rename = "utility")]
    Utility,
}

/// Ordered prefix rules. Longest matching prefix wins; table order breaks
/// ties. `compliance`/`privacy`/`security` all classify as GRC.
const STAGE_RULES: &[(&str, Stage)] = &[
    ("discovery", Stage::Discovery),
    ("prototype", Stage::Prototype),
    ("proto", Stage::Prototype),
    ("product-specs", Stage::ProductSpecs),
    ("product", Stage::ProductSpecs),
    ("specs", Stage::ProductSpecs),
    ("spec", Stage::ProductSpecs),
    ("sol-arch", Stage::SolArch),
    ("solarch", Stage::SolArch),
    ("arch", Stage::SolArch),
    ("implementation", Stage::Implementation),
    ("impl", Stage::Implementation),
    ("quality", Stage::Quality),
    ("test", Stage::Quality),
    ("compliance", Stage::Grc),
    ("privacy", Stage::Grc),
    ("security", Stage::Grc),
    ("grc", Stage::Grc),
    ("process", Stage::Process),
    ("reflexion", Stage::Reflexion),
    ("retro", Stage::Reflexion),
    ("traceability", Stage::Traceability),
    ("trace", Stage::Traceability),
    ("kaizen", Stage::Kaizen),
    ("rules", Stage::Rules),
    ("rule", Stage::Rules),
    ("shared", Stage::Shared),
    ("common", Stage::Shared),
    ("utility", Stage::Utility),
    ("util", Stage::Utility),
];

impl Stage {
    /// Classify an entry id by its lowercased prefix. Defaults to `Utility`.
    pub fn from_id(id: &str) -> Self {
        let id = id.to_lowercase();
        let mut best: Option<(&str, Stage)> = None;
        for &(prefix, stage) in STAGE_RULES {
            if id.starts_with(prefix) {
                match best {
                    Some((current, _)) if current.len() >= prefix.len() => {}
                    _ => best = Some((prefix, stage)),
                }
            }
        }
        best.map(|(_, stage)| stage).unwrap_or(Stage::Utility)
    }

    /// Wire/display name, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Discovery => "discovery",
            Stage::Prototype => "prototype",
            Stage::ProductSpecs => "product-specs",
            Stage::SolArch => "sol-arch",
            Stage::Implementation => "implementation",
            Stage::Quality => "quality",
            Stage::Grc => "grc",
            Stage::Process => "process",
            Stage::Reflexion => "reflexion",
            Stage::Traceability => "traceability",
            Stage::Kaizen => "kaizen",
            Stage::Rules => "rules",
            Stage::Security => "security",
            Stage::Shared => "shared",
            Stage::Utility => "utility",
        }
    }

    /// Display color for agents, by stage.
    pub fn color(&self) -> &'static str {
        match self {
            Stage::Discovery => "#8b5cf6",
            Stage::Prototype => "#ec4899",
            Stage::ProductSpecs => "#3b82f6",
            Stage::SolArch => "#06b6d4",
            Stage::Implementation => "#10b981",
            Stage::Quality => "#f59e0b",
            Stage::Grc => "#ef4444",
            Stage::Process => "#6366f1",
            Stage::Reflexion => "#a855f7",
            Stage::Traceability => "#14b8a6",
            Stage::Kaizen => "#84cc16",
            Stage::Rules => "#f97316",
            Stage::Security => "#dc2626",
            Stage::Shared => "#64748b",
            Stage::Utility => "#94a3b8",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle order shared by all precedence arrays.
const LIFECYCLE_ORDER: [Stage; 15] = [
    Stage::Discovery,
    Stage::Prototype,
    Stage::ProductSpecs,
    Stage::SolArch,
    Stage::Implementation,
    Stage::Quality,
    Stage::Grc,
    Stage::Security,
    Stage::Process,
    Stage::Reflexion,
    Stage::Traceability,
    Stage::Kaizen,
    Stage::Rules,
    Stage::Shared,
    Stage::Utility,
];

/// Fixed per-entity-type sort precedence.
pub const SKILL_STAGE_ORDER: [Stage; 15] = LIFECYCLE_ORDER;
pub const COMMAND_STAGE_ORDER: [Stage; 15] = LIFECYCLE_ORDER;
pub const AGENT_STAGE_ORDER: [Stage; 15] = LIFECYCLE_ORDER;

/// Index of a stage within a precedence array; unknown stages sort last.
pub fn precedence(stage: Stage, order: &[Stage]) -> usize {
    order.iter().position(|s| *s == stage).unwrap_or(order.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_deterministic() {
        for id in ["discovery-jtbd", "kaizen-loop", "whatever", ""] {
            assert_eq!(Stage::from_id(id), Stage::from_id(id));
        }
    }

    #[test]
    fn prefix_rules_match_case_insensitively() {
        assert_eq!(Stage::from_id("Discovery-Research"), Stage::Discovery);
        assert_eq!(Stage::from_id("KAIZEN-review"), Stage::Kaizen);
    }

    #[test]
    fn grc_aliases_all_map_to_grc() {
        assert_eq!(Stage::from_id("compliance-check"), Stage::Grc);
        assert_eq!(Stage::from_id("privacy-review"), Stage::Grc);
        assert_eq!(Stage::from_id("security-audit"), Stage::Grc);
    }

    #[test]
    fn longest_prefix_wins() {
        // "product-specs-writer" matches both "product" and "product-specs".
        assert_eq!(Stage::from_id("product-specs-writer"), Stage::ProductSpecs);
        assert_eq!(Stage::from_id("proto-screens"), Stage::Prototype);
        assert_eq!(Stage::from_id("prototype-screens"), Stage::Prototype);
    }

    #[test]
    fn unmatched_prefix_defaults_to_utility() {
        assert_eq!(Stage::from_id("zzz-helper"), Stage::Utility);
        assert_eq!(Stage::from_id(""), Stage::Utility);
    }

    #[test]
    fn wire_names_round_trip_through_serde() {
        let json = serde_json::to_string(&Stage::ProductSpecs).unwrap();
        assert_eq!(json, "\"product-specs\"");
        let back: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Stage::ProductSpecs);
    }

    #[test]
    fn precedence_orders_discovery_before_utility() {
        assert!(
            precedence(Stage::Discovery, &SKILL_STAGE_ORDER)
                < precedence(Stage::Utility, &SKILL_STAGE_ORDER)
        );
    }
}
