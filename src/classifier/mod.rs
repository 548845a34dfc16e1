//! Constraint classification
//!
//! Deterministic keyword scoring: every rule counts how many of its keywords
//! occur (case-insensitively, as substrings) in the request, the strictly
//! highest score wins, and ties go to the rule declared first. A request that
//! matches nothing is an "artificial" constraint rather than an error.

pub mod rules;

pub use rules::{ConstraintRule, RuleSet};

use tracing::debug;

use crate::types::{Constraint, ConstraintType};

/// Reality level assigned when no rule matches
pub const FALLBACK_REALITY_LEVEL: f64 = 0.3;

/// Mechanism label for the fallback constraint
pub const FALLBACK_MECHANISM: &str = "Assumed limitation";

/// Maps request text to a typed constraint
pub struct ConstraintClassifier {
    rules: RuleSet,
    /// Every matched classification, oldest first. Unbounded.
    history: Vec<Constraint>,
}

impl ConstraintClassifier {
    /// Classifier over the built-in rule table
    pub fn new() -> Self {
        Self::with_rules(RuleSet::builtin())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            history: Vec::new(),
        }
    }

    /// Classify a request. Never fails.
    pub fn classify(&mut self, text: &str) -> Constraint {
        let text_lower = text.to_lowercase();

        let mut best: Option<&ConstraintRule> = None;
        let mut highest_score = 0;
        for rule in &self.rules.rules {
            let score = rule.score(&text_lower);
            // strict comparison keeps the earliest rule on ties
            if score > highest_score {
                highest_score = score;
                best = Some(rule);
            }
        }

        match best {
            Some(rule) => {
                let constraint = Constraint::new(
                    rule.constraint_type,
                    rule.reality_level,
                    text,
                    rule.mechanism.clone(),
                );
                debug!(
                    "Classified as {} (score {}, reality {})",
                    constraint.constraint_type, highest_score, constraint.reality_level
                );
                self.history.push(constraint.clone());
                constraint
            }
            None => {
                debug!("No rule matched, falling back to artificial constraint");
                Constraint::new(
                    ConstraintType::Artificial,
                    FALLBACK_REALITY_LEVEL,
                    text,
                    FALLBACK_MECHANISM,
                )
            }
        }
    }

    /// Matched classifications so far
    pub fn history(&self) -> &[Constraint] {
        &self.history
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Default for ConstraintClassifier {
    fn default() -> Self {
        Self::new()
    }
}
