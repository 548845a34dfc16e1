//! Constraint agent
//!
//! The public face of the crate. Front ends call `process_request` and
//! `record_feedback` and read the status counters; everything else is wired
//! up here from a `Config`.

pub mod interactive;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classifier::{ConstraintClassifier, RuleSet};
use crate::cognitive::CognitiveOptimizer;
use crate::config::Config;
use crate::learning::{PatternLearner, PatternStore};
use crate::metrics::{TimeSavings, VerificationEstimate};
use crate::orchestrator::Orchestrator;
use crate::types::{Constraint, ConstraintType, Response};

/// Construction options for the agent
#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub store: PatternStore,
    pub rules: RuleSet,
    pub seed_demo_patterns: bool,
}

impl AgentOptions {
    /// No persistence, built-in rules, no seeding
    pub fn in_memory() -> Self {
        Self {
            store: PatternStore::in_memory(),
            rules: RuleSet::builtin(),
            seed_demo_patterns: false,
        }
    }

    /// Resolve options from a configuration.
    ///
    /// Fails only when a configured rule table cannot be loaded.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = match config.store.resolved_path() {
            Ok(Some(path)) => PatternStore::with_path(path),
            Ok(None) => PatternStore::in_memory(),
            Err(e) => {
                warn!("Pattern persistence disabled: {}", e);
                PatternStore::in_memory()
            }
        };

        Ok(Self {
            store,
            rules: config.classifier.load_rules()?,
            seed_demo_patterns: config.learning.seed_demo_patterns,
        })
    }
}

/// Read-only counters for status reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub total_interactions: u64,
    pub learned_patterns: usize,
    /// Cumulative estimated seconds of verification saved
    pub verification_time_saved: f64,
    pub learning_cycles: u64,
    pub persistence_available: bool,
}

/// Result of `demonstrate_learning`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningReport {
    pub request: String,
    pub response: Response,
    pub estimate: VerificationEstimate,
    pub success: bool,
    pub message: String,
    pub status: AgentStatus,
}

/// Classifies requests, answers them and learns from feedback
pub struct ConstraintAgent {
    orchestrator: Orchestrator,
    total_interactions: u64,
    savings: TimeSavings,
}

impl ConstraintAgent {
    pub fn new(options: AgentOptions) -> Self {
        let learner = PatternLearner::new(options.store);
        let orchestrator = Orchestrator::new(
            ConstraintClassifier::with_rules(options.rules),
            learner,
            CognitiveOptimizer::new(),
        );

        let mut agent = Self {
            orchestrator,
            total_interactions: 0,
            savings: TimeSavings::default(),
        };

        if options.seed_demo_patterns {
            agent.seed_demo_patterns();
        }
        agent
    }

    /// Agent built from a configuration file's settings
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(AgentOptions::from_config(config)?))
    }

    /// Agent with no persistence and no seeded patterns
    pub fn in_memory() -> Self {
        Self::new(AgentOptions::in_memory())
    }

    /// Classify, answer and count one request
    pub fn process_request(&mut self, text: &str) -> Response {
        self.total_interactions += 1;
        self.orchestrator.handle(text)
    }

    /// Record whether a previously returned response worked
    pub fn record_feedback(&mut self, text: &str, response: &Response, success: bool) {
        self.orchestrator.feedback(text, response, success);
    }

    /// Process a request, record feedback and account for time saved
    pub fn demonstrate_learning(&mut self, text: &str, success: bool) -> LearningReport {
        let response = self.process_request(text);
        let estimate = VerificationEstimate::new(
            response.constraint_analysis.constraint_type,
            text,
            self.orchestrator.learner().len(),
        );

        self.record_feedback(text, &response, success);

        let message = if success {
            self.savings.record(&estimate);
            format!(
                ">> LEARNING ENCODED: This pattern will improve future responses by {:.0}s",
                estimate.saved_secs
            )
        } else {
            ">> LEARNING OPPORTUNITY: System will adapt based on this feedback".to_string()
        };
        debug!("{}", message);

        LearningReport {
            request: text.to_string(),
            response,
            estimate,
            success,
            message,
            status: self.status(),
        }
    }

    pub fn status(&self) -> AgentStatus {
        let learner = self.orchestrator.learner();
        AgentStatus {
            total_interactions: self.total_interactions,
            learned_patterns: learner.len(),
            verification_time_saved: self.savings.total_saved_secs,
            learning_cycles: learner.learning_cycles(),
            persistence_available: learner.store().is_persistent(),
        }
    }

    pub fn total_interactions(&self) -> u64 {
        self.total_interactions
    }

    pub fn learned_pattern_count(&self) -> usize {
        self.orchestrator.learner().len()
    }

    pub fn verification_time_saved(&self) -> f64 {
        self.savings.total_saved_secs
    }

    pub fn learner(&self) -> &PatternLearner {
        self.orchestrator.learner()
    }

    pub fn classification_history(&self) -> &[Constraint] {
        self.orchestrator.classifier().history()
    }

    /// Forget all learned patterns, in memory and on disk
    pub fn clear_patterns(&mut self) -> bool {
        self.orchestrator.learner_mut().clear()
    }

    /// Encode a few known-good patterns so first answers can be reused.
    /// Signatures already present are left alone.
    fn seed_demo_patterns(&mut self) {
        let demo = [
            Constraint::new(ConstraintType::Memory, 0.9, "memory leak issue", "RAM limitation"),
            Constraint::new(ConstraintType::Security, 0.85, "authentication system", "Attack surface"),
            Constraint::new(ConstraintType::Latency, 0.9, "API response time", "Network physics"),
        ];

        let learner = self.orchestrator.learner_mut();
        let mut seeded = 0;
        for constraint in &demo {
            if learner.contains(&constraint.signature()) {
                continue;
            }
            let summary = format!("Optimized solution for {}", constraint.constraint_type);
            learner.encode(constraint, &summary, true);
            seeded += 1;
        }
        if seeded > 0 {
            info!("Seeded {} demo patterns", seeded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SolutionType;
    use tempfile::tempdir;

    fn seeded_agent() -> ConstraintAgent {
        let mut options = AgentOptions::in_memory();
        options.seed_demo_patterns = true;
        ConstraintAgent::new(options)
    }

    #[test]
    fn test_seeding() {
        let agent = seeded_agent();
        assert_eq!(agent.learned_pattern_count(), 3);
        assert!(agent.learner().contains("memory_0.9"));
        assert!(agent.learner().contains("security_0.8"));
        assert!(agent.learner().contains("latency_0.9"));
    }

    #[test]
    fn test_seeded_pattern_is_applied() {
        let mut agent = seeded_agent();
        let response = agent.process_request("Fix this memory leak in the application");
        assert_eq!(response.solution_type, SolutionType::LearnedPattern);
        assert!(response.solution.contains("Optimized solution for memory"));
    }

    #[test]
    fn test_seeding_does_not_inflate_persisted_counts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        let options = || AgentOptions {
            store: PatternStore::with_path(&path),
            rules: RuleSet::builtin(),
            seed_demo_patterns: true,
        };

        drop(ConstraintAgent::new(options()));
        let agent = ConstraintAgent::new(options());
        assert_eq!(agent.learner().pattern("memory_0.9").unwrap().usage_count, 1);
        assert!(agent.status().persistence_available);
    }

    #[test]
    fn test_interactions_counted() {
        let mut agent = ConstraintAgent::in_memory();
        let response = agent.process_request("Build secure login system");
        agent.record_feedback("Build secure login system", &response, true);
        agent.process_request("Fix memory leak");

        let status = agent.status();
        assert_eq!(status.total_interactions, 2);
        assert_eq!(status.learned_patterns, 1);
        assert_eq!(status.learning_cycles, 1);
        assert!(!status.persistence_available);
    }

    #[test]
    fn test_demonstrate_learning_positive() {
        let mut agent = seeded_agent();
        let report = agent.demonstrate_learning("Implement secure authentication system", true);
        assert!(report.message.contains("LEARNING ENCODED"));
        assert!(agent.verification_time_saved() > 0.0);
        assert_eq!(report.status.total_interactions, 1);
    }

    #[test]
    fn test_demonstrate_learning_negative() {
        let mut agent = seeded_agent();
        let report = agent.demonstrate_learning("Bad request example", false);
        assert!(report.message.contains("LEARNING OPPORTUNITY"));
        assert_eq!(agent.verification_time_saved(), 0.0);
    }

    #[test]
    fn test_multiple_interactions_increase_patterns() {
        let mut agent = ConstraintAgent::in_memory();
        for request in [
            "Secure authentication system with rate limiting",
            "Database performance optimization with caching",
            "Memory leak detection and garbage collection",
            "Load balancing configuration for microservices",
        ] {
            agent.demonstrate_learning(request, true);
        }
        assert_eq!(agent.learned_pattern_count(), 4);
    }

    #[test]
    fn test_clear_patterns() {
        let mut agent = seeded_agent();
        assert!(agent.clear_patterns());
        assert_eq!(agent.learned_pattern_count(), 0);
    }
}
