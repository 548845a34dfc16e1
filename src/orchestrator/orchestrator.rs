//! Request orchestration
//!
//! Wires classifier, learner and optimizer into one fixed pipeline:
//! classify, try a learned pattern, otherwise generate from a template,
//! optimize for reading, and report.

use std::time::Instant;
use tracing::{debug, info};

use super::templates::generate_solution;
use crate::classifier::ConstraintClassifier;
use crate::cognitive::CognitiveOptimizer;
use crate::learning::PatternLearner;
use crate::types::{CognitiveOptimization, Constraint, Response, SolutionType};

/// Owns the pipeline components; the learner holds the only mutable pattern table
pub struct Orchestrator {
    classifier: ConstraintClassifier,
    learner: PatternLearner,
    optimizer: CognitiveOptimizer,
}

impl Orchestrator {
    pub fn new(
        classifier: ConstraintClassifier,
        learner: PatternLearner,
        optimizer: CognitiveOptimizer,
    ) -> Self {
        Self {
            classifier,
            learner,
            optimizer,
        }
    }

    /// Default classifier and optimizer around the given learner
    pub fn with_learner(learner: PatternLearner) -> Self {
        Self::new(ConstraintClassifier::new(), learner, CognitiveOptimizer::new())
    }

    /// Run one request through the pipeline
    pub fn handle(&mut self, text: &str) -> Response {
        let start = Instant::now();

        let constraint = self.classifier.classify(text);

        let (solution, solution_type) = match self.learner.apply(&constraint) {
            Some(learned) => (
                self.optimizer.optimize(&learned, &constraint),
                SolutionType::LearnedPattern,
            ),
            None => {
                let generated = generate_solution(&constraint);
                (
                    self.optimizer.optimize(&generated, &constraint),
                    SolutionType::NewGeneration,
                )
            }
        };

        let processing_time = start.elapsed().as_secs_f64();
        let cognitive_optimization = CognitiveOptimization::from_solution(&solution);
        info!(
            "Handled {} request as {} ({}) in {:.3}s",
            constraint.constraint_type, solution_type, cognitive_optimization, processing_time
        );

        Response {
            solution,
            solution_type,
            reality_alignment: constraint.reality_level,
            constraint_analysis: constraint,
            processing_time,
            learning_cycles: self.learner.learning_cycles(),
            cognitive_optimization,
        }
    }

    /// Record whether a response worked.
    ///
    /// The stored classification is reused as-is; only the context comes from
    /// `text`. The text is never re-classified.
    pub fn feedback(&mut self, text: &str, response: &Response, success: bool) {
        let analysis = &response.constraint_analysis;
        let constraint = Constraint::new(
            analysis.constraint_type,
            analysis.reality_level,
            text,
            analysis.causal_mechanism.clone(),
        );
        debug!("Feedback for {}: {}", constraint.signature(), success);
        self.learner.encode(&constraint, &response.solution, success);
    }

    pub fn classifier(&self) -> &ConstraintClassifier {
        &self.classifier
    }

    pub fn learner(&self) -> &PatternLearner {
        &self.learner
    }

    pub fn learner_mut(&mut self) -> &mut PatternLearner {
        &mut self.learner
    }

    pub fn optimizer(&self) -> &CognitiveOptimizer {
        &self.optimizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConstraintType;

    const LONG_MICROSERVICE_REQUEST: &str = "Design complete microservice architecture with \
        authentication, caching, monitoring, logging, error handling, rate limiting, load \
        balancing, database sharding, message queuing, and distributed tracing for enterprise scale";

    fn orchestrator() -> Orchestrator {
        Orchestrator::with_learner(PatternLearner::in_memory())
    }

    #[test]
    fn test_new_generation_without_patterns() {
        let mut orchestrator = orchestrator();
        let response = orchestrator.handle("Need secure database connection");

        assert_eq!(response.solution_type, SolutionType::NewGeneration);
        assert_eq!(response.constraint_analysis.constraint_type, ConstraintType::Security);
        assert_eq!(response.reality_alignment, 0.85);
        assert_eq!(response.learning_cycles, 0);
        assert!(response.solution.contains("SECURITY-ALIGNED SOLUTION"));
        assert!(response.processing_time >= 0.0);
    }

    #[test]
    fn test_long_microservice_request_is_chunked() {
        let mut orchestrator = orchestrator();
        let response = orchestrator.handle(LONG_MICROSERVICE_REQUEST);

        assert_eq!(response.cognitive_optimization, CognitiveOptimization::Chunked);
        assert!(response.solution.contains("COGNITIVE OPTIMIZATION APPLIED"));
        let component_headers = response
            .solution
            .lines()
            .filter(|line| line.starts_with("**") && !line.contains("Next Steps"))
            .count();
        assert!(component_headers <= 7);
        assert!(orchestrator.optimizer().chunking_applied());
    }

    #[test]
    fn test_feedback_creates_pattern_and_learned_reuse() {
        let mut orchestrator = orchestrator();
        let response = orchestrator.handle("Test security request");
        orchestrator.feedback("Test security request", &response, true);

        assert_eq!(orchestrator.learner().len(), 1);
        assert!(orchestrator.learner().contains("security_0.8"));

        let again = orchestrator.handle("Build secure login system");
        assert_eq!(again.solution_type, SolutionType::LearnedPattern);
        assert_eq!(again.learning_cycles, 1);
        assert!(again.solution.contains("LEARNED PATTERN APPLIED"));
    }

    #[test]
    fn test_feedback_reuses_stored_classification() {
        let mut orchestrator = orchestrator();
        let response = orchestrator.handle("Fix this memory leak in the application");

        // text that would classify differently must not move the pattern
        orchestrator.feedback("API response is slow and timing out", &response, true);
        assert!(orchestrator.learner().contains("memory_0.9"));
        assert!(!orchestrator.learner().contains("latency_0.9"));
    }

    #[test]
    fn test_negative_feedback_keeps_generating() {
        let mut orchestrator = orchestrator();
        let response = orchestrator.handle("Fix memory leak");
        orchestrator.feedback("Fix memory leak", &response, false);

        let again = orchestrator.handle("Fix memory leak");
        assert_eq!(again.solution_type, SolutionType::NewGeneration);
    }

    #[test]
    fn test_artificial_request_uses_adaptive_template() {
        let mut orchestrator = orchestrator();
        let response = orchestrator.handle("Something completely unrelated to known patterns");
        assert_eq!(response.constraint_analysis.constraint_type, ConstraintType::Artificial);
        assert_eq!(response.reality_alignment, 0.3);
        assert!(response.solution.contains("ADAPTIVE SOLUTION for ARTIFICIAL"));
    }
}
