//! Pattern persistence across agent instances

use reality_agent::{AgentOptions, ConstraintAgent, PatternStore, RuleSet, SolutionType};
use std::path::Path;
use tempfile::tempdir;

fn agent_at(path: &Path) -> ConstraintAgent {
    ConstraintAgent::new(AgentOptions {
        store: PatternStore::with_path(path),
        rules: RuleSet::builtin(),
        seed_demo_patterns: false,
    })
}

#[test]
fn test_learning_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("patterns.json");
    let request = "Fix this memory leak in the application";

    {
        let mut agent = agent_at(&path);
        let response = agent.process_request(request);
        agent.record_feedback(request, &response, true);
    }
    assert!(path.exists());

    let mut agent = agent_at(&path);
    assert_eq!(agent.learned_pattern_count(), 1);
    let pattern = agent.learner().pattern("memory_0.9").unwrap();
    assert_eq!(pattern.usage_count, 1);
    assert_eq!(pattern.success_rate, 1.0);

    let response = agent.process_request(request);
    assert_eq!(response.solution_type, SolutionType::LearnedPattern);
}

#[test]
fn test_pattern_file_is_json_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("patterns.json");

    let mut agent = agent_at(&path);
    let response = agent.process_request("Build secure login system");
    agent.record_feedback("Build secure login system", &response, false);

    let contents = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let record = &value["security_0.8"];
    assert_eq!(record["constraint_signature"], "security_0.8");
    assert_eq!(record["usage_count"], 1);
    assert_eq!(record["success_rate"], 0.0);
    assert!(record["created_at"].is_string());
    assert!(record["transformation_method"].as_str().unwrap().chars().count() <= 100);
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("patterns.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut agent = agent_at(&path);
    assert_eq!(agent.learned_pattern_count(), 0);

    // the next successful save replaces the broken file
    let response = agent.process_request("Fix memory leak");
    agent.record_feedback("Fix memory leak", &response, true);
    assert_eq!(agent_at(&path).learned_pattern_count(), 1);
}

#[test]
fn test_clear_removes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("patterns.json");

    let mut agent = agent_at(&path);
    let response = agent.process_request("Fix memory leak");
    agent.record_feedback("Fix memory leak", &response, true);
    assert!(path.exists());

    assert!(agent.clear_patterns());
    assert!(!path.exists());
    assert_eq!(agent_at(&path).learned_pattern_count(), 0);
}

#[test]
fn test_unwritable_location_degrades_to_memory() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut agent = agent_at(&blocker.join("patterns.json"));
    assert!(!agent.status().persistence_available);

    let response = agent.process_request("Fix memory leak");
    agent.record_feedback("Fix memory leak", &response, true);
    let response = agent.process_request("Fix memory leak");
    assert_eq!(response.solution_type, SolutionType::LearnedPattern);
}

#[test]
fn test_directory_as_store_path_reports_no_persistence() {
    let dir = tempdir().unwrap();

    let mut agent = agent_at(dir.path());
    assert!(!agent.status().persistence_available);

    let response = agent.process_request("Fix memory leak");
    agent.record_feedback("Fix memory leak", &response, true);
    assert_eq!(agent.learned_pattern_count(), 1);
}
