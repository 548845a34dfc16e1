//! Pattern Learner - incremental success statistics per constraint signature
//!
//! Owns the in-memory pattern table. Each `encode` folds one boolean outcome
//! into a running mean (no decay, no window) and rewrites the backing store.
//! `apply` hands back a learned answer only once its success rate clears the
//! confidence threshold.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::store::{parse_timestamp, PatternRecord, PatternStore, PatternTable};
use crate::types::Constraint;

/// A pattern is reused only when its success rate is strictly above this
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Maximum characters kept from an encoded solution
pub const METHOD_SUMMARY_LIMIT: usize = 100;

/// Accumulated statistics for one signature
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub signature: String,
    pub method_summary: String,
    /// Mean of all recorded outcomes, 0.0-1.0
    pub success_rate: f64,
    pub usage_count: u64,
    pub created_at: DateTime<Utc>,
}

impl Pattern {
    fn to_record(&self) -> PatternRecord {
        PatternRecord {
            constraint_signature: self.signature.clone(),
            transformation_method: self.method_summary.clone(),
            success_rate: self.success_rate,
            usage_count: self.usage_count,
            created_at: self.created_at.to_rfc3339(),
        }
    }

    fn from_record(signature: &str, record: PatternRecord) -> Option<Self> {
        let created_at = parse_timestamp(&record.created_at)?;
        Some(Self {
            signature: signature.to_string(),
            method_summary: record.transformation_method,
            success_rate: record.success_rate,
            usage_count: record.usage_count,
            created_at,
        })
    }

    /// Fold one more outcome into the running mean
    fn record_outcome(&mut self, success: bool) {
        self.usage_count += 1;
        let n = self.usage_count as f64;
        let outcome = if success { 1.0 } else { 0.0 };
        self.success_rate = (self.success_rate * (n - 1.0) + outcome) / n;
    }
}

/// Learns which constraint signatures have reliable solutions
pub struct PatternLearner {
    patterns: BTreeMap<String, Pattern>,
    store: PatternStore,
    learning_cycles: u64,
}

impl PatternLearner {
    /// Create a learner, loading whatever the store already holds
    pub fn new(store: PatternStore) -> Self {
        // the store has already validated every record
        let patterns: BTreeMap<String, Pattern> = store
            .load()
            .into_iter()
            .map(|(signature, record)| {
                Pattern::from_record(&signature, record).map(|pattern| (signature, pattern))
            })
            .collect::<Option<_>>()
            .unwrap_or_else(|| {
                warn!("Stored pattern table unreadable, starting empty");
                BTreeMap::new()
            });

        if !patterns.is_empty() {
            info!("Loaded {} learned patterns", patterns.len());
        }

        Self {
            patterns,
            store,
            learning_cycles: 0,
        }
    }

    /// Learner with no persistence
    pub fn in_memory() -> Self {
        Self::new(PatternStore::in_memory())
    }

    /// Record the outcome of a solution for this constraint's signature
    pub fn encode(&mut self, constraint: &Constraint, solution_summary: &str, success: bool) {
        let signature = constraint.signature();

        match self.patterns.get_mut(&signature) {
            Some(pattern) => {
                pattern.record_outcome(success);
                debug!(
                    "Updated pattern {}: success rate {:.3} over {} uses",
                    signature, pattern.success_rate, pattern.usage_count
                );
            }
            None => {
                let pattern = Pattern {
                    signature: signature.clone(),
                    method_summary: truncate_chars(solution_summary, METHOD_SUMMARY_LIMIT),
                    success_rate: if success { 1.0 } else { 0.0 },
                    usage_count: 1,
                    created_at: Utc::now(),
                };
                info!(
                    "Learned new pattern {}: {}",
                    signature,
                    crate::truncate_safe(&pattern.method_summary, 40)
                );
                self.patterns.insert(signature, pattern);
            }
        }

        self.learning_cycles += 1;
        // in-memory state stays authoritative if this fails
        self.persist();
    }

    /// Learned answer for this constraint, if one is confident enough
    pub fn apply(&self, constraint: &Constraint) -> Option<String> {
        let pattern = self.patterns.get(&constraint.signature())?;
        if pattern.success_rate <= CONFIDENCE_THRESHOLD {
            debug!(
                "Pattern {} below confidence threshold ({:.3})",
                pattern.signature, pattern.success_rate
            );
            return None;
        }

        Some(format!(
            "🧬 LEARNED PATTERN APPLIED (Success Rate: {:.1}%)\nBased on {} previous transformations:\n\n{}",
            pattern.success_rate * 100.0,
            pattern.usage_count,
            pattern.method_summary
        ))
    }

    pub fn pattern(&self, signature: &str) -> Option<&Pattern> {
        self.patterns.get(signature)
    }

    pub fn contains(&self, signature: &str) -> bool {
        self.patterns.contains_key(signature)
    }

    /// All patterns, ordered by signature
    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.values()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of `encode` calls since this learner was created
    pub fn learning_cycles(&self) -> u64 {
        self.learning_cycles
    }

    pub fn store(&self) -> &PatternStore {
        &self.store
    }

    /// Forget every pattern, in memory and on disk
    pub fn clear(&mut self) -> bool {
        let count = self.patterns.len();
        self.patterns.clear();
        let removed = self.store.clear();
        info!("Cleared {} learned patterns", count);
        removed
    }

    /// Serializable snapshot of the table
    pub fn to_table(&self) -> PatternTable {
        self.patterns
            .iter()
            .map(|(signature, pattern)| (signature.clone(), pattern.to_record()))
            .collect()
    }

    fn persist(&self) {
        if self.store.is_persistent() && !self.store.save(&self.to_table()) {
            warn!("Pattern table not persisted; continuing in memory");
        }
    }
}

/// Keep at most `max_chars` characters, no ellipsis
fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
