//! Evaluator Module - Agent to Cloud Evaluation
//!
//! The only suspension point of the agent: one call per submit attempt.

pub mod client;

pub use client::{HttpEvaluator, EvaluatorConfig};

use pitchguard_core::{EvaluateRequest, EvaluateResponse};

use crate::error::TransportError;

/// Remote evaluator. `Ok` carries any well-formed response body,
/// `success:false` included; everything else is a `TransportError`.
#[async_trait::async_trait(?Send)]
pub trait RemoteEvaluator {
    async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse, TransportError>;
}
