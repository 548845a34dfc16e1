//! Self-Improving Learning System
//!
//! Tracks, per constraint signature, how often a solution worked and
//! persists those statistics as a single JSON document so confident
//! answers survive restarts.

pub mod store;
pub mod learner;

pub use store::{PatternStore, PatternRecord, PatternTable};
pub use learner::{PatternLearner, Pattern, CONFIDENCE_THRESHOLD, METHOD_SUMMARY_LIMIT};
