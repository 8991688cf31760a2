//! Decision Policy
//!
//! Pure function of (scores, thresholds). Tiers are checked in strict
//! order and the first match wins:
//! 1. `blocked`    if either score >= `thresholds.spam`
//! 2. `challenged` if either score >= `thresholds.sales`
//! 3. `held`       if either score >= `thresholds.sales - 0.2`
//! 4. `allowed`
//!
//! Both scores are compared against the same threshold in every tier.

use crate::constants::HOLD_BAND;
use super::config::Thresholds;
use super::types::{Challenge, Decision, DecisionOutcome};

// ============================================================================
// MESSAGE TEMPLATES
// ============================================================================

pub const ALLOWED_MESSAGE: &str = "Your message has been sent.";
pub const CHALLENGED_MESSAGE: &str =
    "Your message looks like a sales or promotional inquiry. Please confirm before sending.";
pub const HELD_MESSAGE: &str = "Your message has been received and is pending review.";
pub const BLOCKED_MESSAGE: &str =
    "Your message was not sent because it appears to be a sales pitch or spam.";
pub const CHALLENGE_QUESTION: &str =
    "This form does not accept sales or promotional messages. Is your message a genuine inquiry? Send it anyway?";

// ============================================================================
// MAIN DECISION FUNCTION
// ============================================================================

/// Map two blended scores and the thresholds to a decision
pub fn decide(sales: f64, spam: f64, threshold_sales: f64, threshold_spam: f64) -> Decision {
    if sales >= threshold_spam || spam >= threshold_spam {
        Decision::Blocked
    } else if sales >= threshold_sales || spam >= threshold_sales {
        Decision::Challenged
    } else if sales >= threshold_sales - HOLD_BAND || spam >= threshold_sales - HOLD_BAND {
        Decision::Held
    } else {
        Decision::Allowed
    }
}

/// Decision with its template message and, for `challenged`, the question
pub fn decide_outcome(sales: f64, spam: f64, thresholds: &Thresholds) -> DecisionOutcome {
    let decision = decide(sales, spam, thresholds.sales, thresholds.spam);
    DecisionOutcome {
        decision,
        message: message_for(decision).to_string(),
        challenge: match decision {
            Decision::Challenged => Some(Challenge::self_report(CHALLENGE_QUESTION)),
            _ => None,
        },
    }
}

/// Template message per decision kind
pub fn message_for(decision: Decision) -> &'static str {
    match decision {
        Decision::Allowed => ALLOWED_MESSAGE,
        Decision::Challenged => CHALLENGED_MESSAGE,
        Decision::Held => HELD_MESSAGE,
        Decision::Blocked => BLOCKED_MESSAGE,
    }
}

// ============================================================================
// TESTS
// ============================================================================
