//! Policy Module
//!
//! Turns blended scores into one of four ordered decisions.
//!
//! ## Structure
//! - `types`: `Decision`, `Challenge`, `DecisionOutcome`
//! - `config`: `Thresholds`
//! - `engine`: `decide`, `decide_outcome`, message templates
//!
//! ## Usage
//! ```
//! use pitchguard_core::logic::policy::{decide, Decision};
//!
//! assert_eq!(decide(0.9, 0.2, 0.7, 0.85), Decision::Blocked);
//! ```

pub mod types;
pub mod config;
pub mod engine;

pub use config::{ThresholdError, Thresholds};
pub use engine::{decide, decide_outcome, message_for, CHALLENGE_QUESTION};
pub use types::{Challenge, Decision, DecisionOutcome, SELF_REPORT};
