//! Request orchestration module

pub mod orchestrator;
pub mod templates;

pub use orchestrator::Orchestrator;
pub use templates::generate_solution;
