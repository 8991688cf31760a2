//! Scoring Types

use serde::{Deserialize, Serialize};

/// Clamp a score into [0, 1]; NaN collapses to 0
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Sales/spam scores plus the reasons that produced them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub sales: f64,
    pub spam: f64,
    pub reasons: Vec<String>,
}

impl ScoreCard {
    pub(crate) fn add_sales(&mut self, delta: f64, reason: impl Into<String>) {
        self.sales += delta;
        self.reasons.push(reason.into());
    }

    pub(crate) fn add_spam(&mut self, delta: f64, reason: impl Into<String>) {
        self.spam += delta;
        self.reasons.push(reason.into());
    }

    /// Clamp both scores into [0, 1]
    pub fn clamped(mut self) -> Self {
        self.sales = clamp_score(self.sales);
        self.spam = clamp_score(self.spam);
        self
    }
}

/// Output of the external AI scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiScore {
    pub sales_score: f64,
    pub spam_score: f64,
    #[serde(default)]
    pub reasoning: String,
}

impl AiScore {
    /// Neutral score used whenever the scorer fails or is disabled
    pub fn fallback(reasoning: impl Into<String>) -> Self {
        Self {
            sales_score: 0.0,
            spam_score: 0.0,
            reasoning: reasoning.into(),
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            sales_score: clamp_score(self.sales_score),
            spam_score: clamp_score(self.spam_score),
            reasoning: self.reasoning,
        }
    }
}
