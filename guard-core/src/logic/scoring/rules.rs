//! Scoring Weights & Thresholds
//!
//! Constants only; the accumulation logic lives in `engine`.

// ============================================================================
// SALES WEIGHTS
// ============================================================================

/// Any URL in the submission
pub const URL_WEIGHT: f64 = 0.3;

/// Any link to a scheduling service
pub const SCHEDULING_WEIGHT: f64 = 0.3;

/// Per distinct banned keyword
pub const BANNED_KEYWORD_WEIGHT: f64 = 0.2;

/// Per distinct built-in sales keyword
pub const SALES_KEYWORD_WEIGHT: f64 = 0.15;

/// Flat, regardless of how many blocked domains matched
pub const BLOCKED_DOMAIN_WEIGHT: f64 = 0.4;

/// Content was pasted rather than typed
pub const PASTE_WEIGHT: f64 = 0.2;

// ============================================================================
// SPAM WEIGHTS
// ============================================================================

/// Per distinct built-in spam keyword
pub const SPAM_KEYWORD_WEIGHT: f64 = 0.3;

/// Submitted faster than a human plausibly types
pub const FAST_SUBMIT_WEIGHT: f64 = 0.3;

/// Seconds under which a submission counts as fast
pub const FAST_SUBMIT_SECS: f64 = 5.0;

// ============================================================================
// AI BLEND
// ============================================================================

/// Weight of the rule score in the blend
pub const RULE_BLEND_WEIGHT: f64 = 0.6;

/// Weight of the AI score in the blend
pub const AI_BLEND_WEIGHT: f64 = 0.4;

// ============================================================================
// REASON TOKENS
// ============================================================================

pub mod reasons {
    pub const URL_DETECTED: &str = "url_detected";
    pub const SCHEDULING_URL: &str = "scheduling_url";
    pub const BANNED_KEYWORDS: &str = "banned_keywords";
    pub const SALES_KEYWORDS: &str = "sales_keywords";
    pub const SPAM_KEYWORDS: &str = "spam_keywords";
    pub const BLOCKED_DOMAIN_PREFIX: &str = "blocked_domain:";
    pub const PASTE_DETECTED: &str = "paste_detected";
    pub const FAST_SUBMISSION: &str = "fast_submission";
}
