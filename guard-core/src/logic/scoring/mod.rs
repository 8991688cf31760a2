//! Scoring Module
//!
//! Rule-based sales/spam accumulation over extracted signals and
//! behavioral telemetry, blended with an external AI score.
//!
//! ## Structure
//! - `rules`: weights, thresholds and reason tokens
//! - `types`: `ScoreCard`, `AiScore`, clamping
//! - `engine`: `score_signals`, `blend`

pub mod rules;
pub mod types;
pub mod engine;

pub use engine::{blend, score_signals};
pub use types::{clamp_score, AiScore, ScoreCard};
