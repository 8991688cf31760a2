//! Evaluation Pipeline
//!
//! extract → rule score → AI score → blend → decide. Stateless apart from
//! the configuration it is built with; shared across requests.

use std::sync::Arc;

use pitchguard_core::{
    blend, decide_outcome, score_signals, AiScore, BehavioralData, DecisionOutcome, DetectionResult,
    FormData, RuleSet, ScoreCard, SignalExtractor, Thresholds,
};

use super::ai_scorer::AiScorer;

/// Everything one evaluation produced
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub detection: DetectionResult,
    pub rule: ScoreCard,
    pub ai: AiScore,
    pub blended: ScoreCard,
    pub outcome: DecisionOutcome,
}

pub struct EvaluationEngine {
    extractor: SignalExtractor,
    thresholds: Thresholds,
    scorer: Arc<dyn AiScorer>,
}

impl EvaluationEngine {
    pub fn new(rules: RuleSet, thresholds: Thresholds, scorer: Arc<dyn AiScorer>) -> Self {
        if thresholds.is_inverted() {
            tracing::warn!(
                "threshold_spam ({}) is below threshold_sales ({}); challenged tier is unreachable",
                thresholds.spam,
                thresholds.sales
            );
        }
        Self {
            extractor: SignalExtractor::new(rules),
            thresholds,
            scorer,
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.scorer.is_enabled()
    }

    pub async fn evaluate(&self, form_data: &FormData, behavior: &BehavioralData) -> Evaluation {
        let signals = self.extractor.extract(form_data);
        let detection = DetectionResult::from(&signals);
        let rule = score_signals(&signals, self.extractor.rules(), behavior);

        let ai = self.scorer.score(&signals.corpus, &detection).await;
        let blended = blend(&rule, &ai);
        let outcome = decide_outcome(blended.sales, blended.spam, &self.thresholds);

        tracing::debug!(
            rule_sales = rule.sales,
            rule_spam = rule.spam,
            ai_sales = ai.sales_score,
            ai_spam = ai.spam_score,
            decision = %outcome.decision,
            "Evaluation scored"
        );

        Evaluation {
            detection,
            rule,
            ai,
            blended,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::ai_scorer::DisabledAiScorer;
    use async_trait::async_trait;
    use pitchguard_core::models::form_data;
    use pitchguard_core::Decision;

    struct FixedScorer(f64, f64);

    #[async_trait]
    impl AiScorer for FixedScorer {
        async fn score(&self, _corpus: &str, _detection: &DetectionResult) -> AiScore {
            AiScore {
                sales_score: self.0,
                spam_score: self.1,
                reasoning: "fixed".into(),
            }
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[tokio::test]
    async fn test_rule_only_pitch_is_allowed() {
        let engine = EvaluationEngine::new(RuleSet::default(), Thresholds::default(), Arc::new(DisabledAiScorer));
        let data = form_data([("message", "営業提案です。詳細はこちら https://example.com")]);

        let evaluation = engine.evaluate(&data, &BehavioralData::default()).await;

        // rule 0.6, blended 0.36: below the hold floor of 0.5
        assert!(approx(evaluation.rule.sales, 0.6));
        assert!(approx(evaluation.blended.sales, 0.36));
        assert_eq!(evaluation.outcome.decision, Decision::Allowed);
    }

    #[tokio::test]
    async fn test_ai_score_pushes_into_block() {
        let engine = EvaluationEngine::new(RuleSet::default(), Thresholds::default(), Arc::new(FixedScorer(1.0, 0.0)));
        let data = form_data([("message", "営業提案です https://calendly.com/acme")]);

        let evaluation = engine.evaluate(&data, &BehavioralData::default()).await;

        // rule 0.9 → 0.54 + ai 0.4 = 0.94
        assert!(approx(evaluation.blended.sales, 0.94));
        assert_eq!(evaluation.outcome.decision, Decision::Blocked);
        assert!(evaluation.blended.reasons.contains(&"ai:fixed".to_string()));
    }

    #[tokio::test]
    async fn test_fast_paste_submission_scores_spam() {
        let engine = EvaluationEngine::new(RuleSet::default(), Thresholds::default(), Arc::new(FixedScorer(0.5, 0.5)));
        let behavior = BehavioralData {
            paste_detected: true,
            time_to_submit: Some(1.2),
        };

        let evaluation = engine.evaluate(&form_data([("message", "hi")]), &behavior).await;

        // sales: 0.6×0.2 + 0.4×0.5 = 0.32, spam: 0.6×0.3 + 0.4×0.5 = 0.38
        assert!(approx(evaluation.blended.sales, 0.32));
        assert!(approx(evaluation.blended.spam, 0.38));
        assert_eq!(evaluation.outcome.decision, Decision::Allowed);
    }

    #[tokio::test]
    async fn test_challenge_carries_question() {
        let engine = EvaluationEngine::new(RuleSet::default(), Thresholds::default(), Arc::new(FixedScorer(0.9, 0.0)));
        let data = form_data([("message", "営業提案のご連絡 https://example.com")]);

        let evaluation = engine.evaluate(&data, &BehavioralData::default()).await;

        // 0.6×0.6 + 0.4×0.9 = 0.72
        assert!(approx(evaluation.blended.sales, 0.72));
        assert_eq!(evaluation.outcome.decision, Decision::Challenged);
        assert!(evaluation.outcome.challenge.is_some());
    }
}
