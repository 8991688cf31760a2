//! Evaluation Wire Models
//!
//! Request/response bodies of `POST /api/v1/evaluate`, shared by the agent
//! (serializes requests, parses responses) and the cloud (the reverse).

use serde::{Deserialize, Serialize};

use crate::logic::policy::{Challenge, Decision};
use super::form::FormData;

// ============================================================================
// REQUEST
// ============================================================================

/// Page context sent with each evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestMetadata {
    pub url: String,
    pub user_agent: String,
    /// RFC 3339 timestamp of the submit attempt
    pub timestamp: String,
}

/// Behavioral telemetry for one submit attempt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehavioralData {
    #[serde(default)]
    pub paste_detected: bool,
    /// Seconds between page load and submit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_submit: Option<f64>,
}

/// Body of an evaluation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub api_key: String,
    pub form_data: FormData,
    #[serde(default)]
    pub metadata: RequestMetadata,
    #[serde(default)]
    pub behavioral_data: BehavioralData,
}

// ============================================================================
// RESPONSE
// ============================================================================

/// Blended scores, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub sales: f64,
    pub spam: f64,
}

/// Application-level error body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response body; `success` selects which fields are populated.
/// `decision` stays a string on the wire so newer decision kinds parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Scores>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Challenge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl EvaluateResponse {
    /// Successful evaluation
    pub fn evaluated(result: &EvaluationResult) -> Self {
        Self {
            success: true,
            decision: Some(result.decision.as_str().to_string()),
            message: Some(result.message.clone()),
            submission_id: result.submission_id.clone(),
            scores: Some(result.scores),
            reasons: result.reasons.clone(),
            challenge: result.challenge.clone(),
            error: None,
        }
    }

    /// Application-level failure
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(ErrorBody {
                code: Some(code.into()),
                message: Some(message.into()),
            }),
            ..Default::default()
        }
    }

    /// Typed view of a response. `Err` carries the error body of a
    /// `success:false` response. Unknown decision kinds become `allowed`.
    pub fn into_result(self) -> Result<EvaluationResult, ErrorBody> {
        if !self.success {
            return Err(self.error.unwrap_or_default());
        }

        let raw = self.decision.unwrap_or_default();
        let decision = Decision::parse(&raw).unwrap_or_else(|| {
            log::warn!("Unrecognized decision '{}', treating as allowed", raw);
            Decision::Allowed
        });

        Ok(EvaluationResult {
            decision,
            scores: self.scores.unwrap_or_default(),
            reasons: self.reasons,
            message: self.message.unwrap_or_default(),
            challenge: self.challenge,
            submission_id: self.submission_id,
        })
    }
}

/// Typed evaluation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub decision: Decision,
    pub scores: Scores,
    pub reasons: Vec<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Challenge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
}
