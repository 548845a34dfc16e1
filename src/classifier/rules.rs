//! Classification rule table
//!
//! An ordered list of rules. Order is significant: when two categories reach
//! the same keyword score the rule declared first wins, so the table is kept
//! as a `Vec` and never re-sorted. Tables can be loaded from a TOML file with
//! one `[[rules]]` entry per category.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::types::ConstraintType;

/// A single category rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRule {
    pub constraint_type: ConstraintType,
    pub reality_level: f64,
    pub mechanism: String,
    pub keywords: Vec<String>,
}

impl ConstraintRule {
    fn new(constraint_type: ConstraintType, reality_level: f64, mechanism: &str, keywords: &[&str]) -> Self {
        Self {
            constraint_type,
            reality_level,
            mechanism: mechanism.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Number of keywords occurring as substrings of already-lowercased text
    pub fn score(&self, text_lower: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| text_lower.contains(keyword.as_str()))
            .count()
    }
}

/// Ordered rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<ConstraintRule>,
}

impl RuleSet {
    /// Built-in table, in tie-break order
    pub fn builtin() -> Self {
        Self {
            rules: vec![
                ConstraintRule::new(
                    ConstraintType::Memory,
                    0.95,
                    "Hardware limitation",
                    &["memory", "ram", "heap", "leak", "allocation", "garbage"],
                ),
                ConstraintRule::new(
                    ConstraintType::Latency,
                    0.9,
                    "Network physics",
                    &["latency", "speed", "performance", "slow", "timeout", "response"],
                ),
                ConstraintRule::new(
                    ConstraintType::Security,
                    0.85,
                    "Attack surface reality",
                    &[
                        "security",
                        "secure",
                        "auth",
                        "authentication",
                        "login",
                        "permission",
                        "access",
                        "rate limiting",
                        "throttling",
                    ],
                ),
                ConstraintRule::new(
                    ConstraintType::CognitiveLoad,
                    0.9,
                    "Human 7±2 limit",
                    &["complex", "complicated", "overwhelming", "many", "multiple", "confusing"],
                ),
                ConstraintRule::new(
                    ConstraintType::Scalability,
                    0.8,
                    "System physics",
                    &["scale", "scaling", "load", "concurrent", "distributed", "microservice"],
                ),
            ],
        }
    }

    /// Parse a table from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut set: RuleSet = toml::from_str(contents)
            .context("Failed to parse rule table")?;
        for rule in &mut set.rules {
            rule.keywords = rule.keywords.iter().map(|k| k.to_lowercase()).collect();
        }
        set.validate()?;
        Ok(set)
    }

    /// Load a table from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule table {}", path.display()))?;
        let set = Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid rule table {}", path.display()))?;
        info!("Loaded {} classification rules from {}", set.rules.len(), path.display());
        Ok(set)
    }

    /// Serialize back to TOML, preserving order
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize rule table")
    }

    fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            anyhow::bail!("Rule table has no rules");
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.constraint_type == ConstraintType::Artificial {
                anyhow::bail!("'artificial' is reserved for the fallback and cannot have a rule");
            }
            if !seen.insert(rule.constraint_type) {
                anyhow::bail!("Duplicate rule for '{}'", rule.constraint_type);
            }
            if !(0.0..=1.0).contains(&rule.reality_level) {
                anyhow::bail!(
                    "Rule '{}' has reality_level {} outside [0, 1]",
                    rule.constraint_type,
                    rule.reality_level
                );
            }
            if rule.keywords.is_empty() || rule.keywords.iter().any(|k| k.trim().is_empty()) {
                anyhow::bail!("Rule '{}' needs at least one non-empty keyword", rule.constraint_type);
            }
        }
        Ok(())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let order: Vec<_> = RuleSet::builtin().rules.iter().map(|r| r.constraint_type).collect();
        assert_eq!(
            order,
            vec![
                ConstraintType::Memory,
                ConstraintType::Latency,
                ConstraintType::Security,
                ConstraintType::CognitiveLoad,
                ConstraintType::Scalability,
            ]
        );
    }

    #[test]
    fn test_toml_preserves_order_and_lowercases() {
        let toml = r#"
[[rules]]
constraint_type = "scalability"
reality_level = 0.8
mechanism = "System physics"
keywords = ["Shard"]

[[rules]]
constraint_type = "memory"
reality_level = 0.95
mechanism = "Hardware limitation"
keywords = ["heap"]
"#;
        let set = RuleSet::from_toml_str(toml).unwrap();
        assert_eq!(set.rules[0].constraint_type, ConstraintType::Scalability);
        assert_eq!(set.rules[0].keywords, vec!["shard".to_string()]);
        assert_eq!(set.rules[1].constraint_type, ConstraintType::Memory);
    }

    #[test]
    fn test_builtin_survives_toml_roundtrip() {
        let builtin = RuleSet::builtin();
        let text = builtin.to_toml_string().unwrap();
        assert_eq!(RuleSet::from_toml_str(&text).unwrap(), builtin);
    }

    #[test]
    fn test_rejects_invalid_tables() {
        assert!(RuleSet::from_toml_str("rules = []").is_err());

        let artificial = r#"
[[rules]]
constraint_type = "artificial"
reality_level = 0.3
mechanism = "x"
keywords = ["x"]
"#;
        assert!(RuleSet::from_toml_str(artificial).is_err());

        let out_of_range = r#"
[[rules]]
constraint_type = "memory"
reality_level = 1.5
mechanism = "x"
keywords = ["x"]
"#;
        assert!(RuleSet::from_toml_str(out_of_range).is_err());

        let no_keywords = r#"
[[rules]]
constraint_type = "memory"
reality_level = 0.9
mechanism = "x"
keywords = []
"#;
        assert!(RuleSet::from_toml_str(no_keywords).is_err());

        let blank_keyword = r#"
[[rules]]
constraint_type = "memory"
reality_level = 0.9
mechanism = "x"
keywords = [" "]
"#;
        assert!(RuleSet::from_toml_str(blank_keyword).is_err());

        let duplicate = r#"
[[rules]]
constraint_type = "memory"
reality_level = 0.9
mechanism = "x"
keywords = ["x"]

[[rules]]
constraint_type = "memory"
reality_level = 0.9
mechanism = "y"
keywords = ["y"]
"#;
        assert!(RuleSet::from_toml_str(duplicate).is_err());
    }

    #[test]
    fn test_score_counts_substrings() {
        let rule = &RuleSet::builtin().rules[2];
        assert_eq!(rule.score("secure authentication with rate limiting"), 4);
        assert_eq!(rule.score("nothing relevant"), 0);
    }
}
