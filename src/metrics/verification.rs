//! Verification-time estimation
//!
//! Rough model of how long a human would spend checking an answer, and how
//! much of that a learned answer saves. Used for status reporting only.

use serde::{Deserialize, Serialize};

use crate::types::ConstraintType;

/// Share of the estimated verification time a confirmed answer saves
pub const SAVINGS_RATIO: f64 = 0.8;

/// Floor for the learning discount
const MIN_LEARNING_FACTOR: f64 = 0.3;

/// Discount per learned pattern
const LEARNING_STEP: f64 = 0.1;

const COMPLEXITY_WORDS: &[&str] = &["complex", "enterprise", "microservice", "distributed", "multiple"];

/// Baseline seconds to verify an answer in this category
pub fn base_verification_secs(constraint_type: ConstraintType) -> f64 {
    match constraint_type {
        ConstraintType::Security => 180.0,
        ConstraintType::Scalability => 240.0,
        ConstraintType::CognitiveLoad => 300.0,
        ConstraintType::Memory => 120.0,
        ConstraintType::Latency => 150.0,
        ConstraintType::Artificial => 120.0,
    }
}

/// Estimated verification seconds for a request
pub fn estimate_verification_secs(
    constraint_type: ConstraintType,
    request: &str,
    learned_patterns: usize,
) -> f64 {
    let request_lower = request.to_lowercase();
    let complexity_multiplier = 1.0
        + COMPLEXITY_WORDS
            .iter()
            .filter(|w| request_lower.contains(*w))
            .count() as f64
            * 0.5;
    let learning_factor = (1.0 - learned_patterns as f64 * LEARNING_STEP).max(MIN_LEARNING_FACTOR);

    base_verification_secs(constraint_type) * complexity_multiplier * learning_factor
}

/// One estimate and the saving it implies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerificationEstimate {
    pub baseline_secs: f64,
    pub saved_secs: f64,
}

impl VerificationEstimate {
    pub fn new(constraint_type: ConstraintType, request: &str, learned_patterns: usize) -> Self {
        let baseline_secs = estimate_verification_secs(constraint_type, request, learned_patterns);
        Self {
            baseline_secs,
            saved_secs: baseline_secs * SAVINGS_RATIO,
        }
    }

    /// Seconds still spent confirming the answer
    pub fn remaining_secs(&self) -> f64 {
        self.baseline_secs - self.saved_secs
    }
}

/// Cumulative savings across confirmed answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSavings {
    pub total_saved_secs: f64,
    pub confirmed: u64,
}

impl TimeSavings {
    pub fn record(&mut self, estimate: &VerificationEstimate) {
        self.total_saved_secs += estimate.saved_secs;
        self.confirmed += 1;
    }
}
