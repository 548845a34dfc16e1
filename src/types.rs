//! Shared types used across modules
//!
//! Constraint value objects and the structured response handed back to
//! front ends live here so classifier, learner and orchestrator can share
//! them without depending on each other.

use serde::{Deserialize, Serialize};

/// Category a request is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    Memory,
    Latency,
    Security,
    CognitiveLoad,
    Scalability,
    /// Fallback when no rule matched
    Artificial,
}

impl ConstraintType {
    /// Stable lowercase name, also used in pattern signatures
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintType::Memory => "memory",
            ConstraintType::Latency => "latency",
            ConstraintType::Security => "security",
            ConstraintType::CognitiveLoad => "cognitive_load",
            ConstraintType::Scalability => "scalability",
            ConstraintType::Artificial => "artificial",
        }
    }

    /// Parse from the lowercase name
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Some(ConstraintType::Memory),
            "latency" => Some(ConstraintType::Latency),
            "security" => Some(ConstraintType::Security),
            "cognitive_load" => Some(ConstraintType::CognitiveLoad),
            "scalability" => Some(ConstraintType::Scalability),
            "artificial" => Some(ConstraintType::Artificial),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified request: category plus how "real" the limitation is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub constraint_type: ConstraintType,
    /// 0.0 = assumed limitation, 1.0 = physics-based
    pub reality_level: f64,
    /// Original request text, verbatim
    pub context: String,
    pub causal_mechanism: String,
}

impl Constraint {
    pub fn new(
        constraint_type: ConstraintType,
        reality_level: f64,
        context: impl Into<String>,
        causal_mechanism: impl Into<String>,
    ) -> Self {
        Self {
            constraint_type,
            reality_level,
            context: context.into(),
            causal_mechanism: causal_mechanism.into(),
        }
    }

    /// Key identifying the learnable pattern for this constraint.
    ///
    /// One-decimal fixed formatting of the binary float, so 0.85 becomes
    /// `"0.8"` and 0.95 becomes `"0.9"`.
    pub fn signature(&self) -> String {
        format!("{}_{:.1}", self.constraint_type, self.reality_level)
    }
}

/// Where a response's solution text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolutionType {
    LearnedPattern,
    NewGeneration,
}

impl std::fmt::Display for SolutionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolutionType::LearnedPattern => write!(f, "LEARNED_PATTERN"),
            SolutionType::NewGeneration => write!(f, "NEW_GENERATION"),
        }
    }
}

/// Whether the final solution text fits within the 7-line budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CognitiveOptimization {
    Applied,
    Chunked,
}

impl CognitiveOptimization {
    /// More than 7 lines counts as chunked
    pub fn from_solution(solution: &str) -> Self {
        if solution.split('\n').count() <= 7 {
            CognitiveOptimization::Applied
        } else {
            CognitiveOptimization::Chunked
        }
    }
}

impl std::fmt::Display for CognitiveOptimization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CognitiveOptimization::Applied => write!(f, "applied"),
            CognitiveOptimization::Chunked => write!(f, "chunked"),
        }
    }
}

/// Structured result of processing one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub solution: String,
    pub solution_type: SolutionType,
    pub constraint_analysis: Constraint,
    /// Wall-clock seconds spent in the pipeline
    pub processing_time: f64,
    pub learning_cycles: u64,
    pub reality_alignment: f64,
    pub cognitive_optimization: CognitiveOptimization,
}
