//! PitchGuard Core
//!
//! Logic shared by the embed agent and the cloud evaluator:
//!
//! ```text
//! FormData ──► SignalExtractor ──► Signals ─┬─► DetectionSnapshot (agent)
//!                                           └─► score_signals ──► blend(ai) ──► decide ──► Decision
//! ```

pub mod constants;
pub mod logic;
pub mod models;

pub use logic::policy::{decide, decide_outcome, Challenge, Decision, DecisionOutcome, Thresholds};
pub use logic::scoring::{blend, score_signals, AiScore, ScoreCard};
pub use logic::signals::{DetectionResult, DetectionSnapshot, RuleSet, SignalExtractor, Signals};
pub use models::{
    BehavioralData, ErrorBody, EvaluateRequest, EvaluateResponse, EvaluationResult, FieldValue,
    FormData, RequestMetadata, Scores,
};
