//! Policy Types
//!
//! Data structures only.

use serde::{Deserialize, Serialize};

// ============================================================================
// DECISION
// ============================================================================

/// What to do with a submission, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Let the submission through
    Allowed,
    /// Ask the user to confirm before sending
    Challenged,
    /// Keep the submission back for review
    Held,
    /// Refuse the submission
    Blocked,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allowed => "allowed",
            Decision::Challenged => "challenged",
            Decision::Held => "held",
            Decision::Blocked => "blocked",
        }
    }

    /// Parse a wire value; `None` for kinds this build does not know
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "allowed" => Some(Decision::Allowed),
            "challenged" => Some(Decision::Challenged),
            "held" => Some(Decision::Held),
            "blocked" => Some(Decision::Blocked),
            _ => None,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CHALLENGE
// ============================================================================

/// Only challenge kind the policy emits
pub const SELF_REPORT: &str = "self_report";

/// Confirmation question attached to a `challenged` decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    #[serde(rename = "type")]
    pub kind: String,
    pub question: String,
}

impl Challenge {
    pub fn self_report(question: impl Into<String>) -> Self {
        Self {
            kind: SELF_REPORT.to_string(),
            question: question.into(),
        }
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Decision plus its user-facing text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub decision: Decision,
    pub message: String,
    pub challenge: Option<Challenge>,
}
