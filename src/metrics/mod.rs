//! Verification metrics
//!
//! Estimates how much human verification time learned answers save and
//! accumulates the total for status reporting.

pub mod verification;

pub use verification::{estimate_verification_secs, TimeSavings, VerificationEstimate};
