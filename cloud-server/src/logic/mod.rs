//! Logic Module - Evaluation Pipeline
//!
//! - `ai_scorer` - external AI scorer boundary
//! - `evaluation` - extract, score, blend, decide

pub mod ai_scorer;
pub mod evaluation;
