//! Reality Agent - constraint-aware assistant library
//!
//! A small self-improving pipeline:
//! - Keyword-based constraint classification with an ordered, loadable rule table
//! - Learned patterns with running success rates, persisted as JSON
//! - Cognitive chunking of answers into at most seven components
//! - Orchestration with feedback recording
//!
//! # Example
//!
//! ```no_run
//! use reality_agent::ConstraintAgent;
//!
//! let mut agent = ConstraintAgent::in_memory();
//! let response = agent.process_request("Fix this memory leak in the application");
//! println!("{}", response.solution);
//! agent.record_feedback("Fix this memory leak in the application", &response, true);
//! ```

// Core modules (order matters for cross-module dependencies)
pub mod types;
pub mod config;
pub mod classifier;
pub mod learning;
pub mod cognitive;
pub mod orchestrator;
pub mod metrics;
pub mod agent;
pub mod cli;

// Re-export commonly used types for convenience
pub use types::{CognitiveOptimization, Constraint, ConstraintType, Response, SolutionType};

pub use classifier::{ConstraintClassifier, ConstraintRule, RuleSet};

pub use learning::{Pattern, PatternLearner, PatternRecord, PatternStore, PatternTable};

pub use cognitive::CognitiveOptimizer;

pub use orchestrator::Orchestrator;

pub use agent::{AgentOptions, AgentStatus, ConstraintAgent, LearningReport};

pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Constraint-aware assistant library", NAME, VERSION)
}

/// Truncate to at most `max_len` characters, marking the cut with "..."
pub fn truncate_safe(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_safe() {
        assert_eq!(truncate_safe("hello", 10), "hello");
        assert_eq!(truncate_safe("hello world foo bar", 10), "hello w...");
        assert_eq!(truncate_safe("ééééé", 4), "é...");
    }

    #[test]
    fn test_info() {
        assert!(info().starts_with("reality_agent v"));
    }
}
