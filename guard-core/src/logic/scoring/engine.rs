//! Scoring Engine
//!
//! Input: `Signals` + `RuleSet` toggles + `BehavioralData`
//! Output: rule `ScoreCard`, then the AI blend.
//!
//! Every condition is evaluated independently; scores start at 0 and are
//! clamped after accumulation.

use crate::constants::{DEFAULT_SALES_KEYWORDS, DEFAULT_SPAM_KEYWORDS};
use crate::logic::signals::{RuleSet, Signals};
use crate::models::BehavioralData;
use super::rules::*;
use super::types::{clamp_score, AiScore, ScoreCard};

/// Rule-based sales/spam scores
pub fn score_signals(signals: &Signals, rules: &RuleSet, behavior: &BehavioralData) -> ScoreCard {
    let mut card = ScoreCard::default();

    if rules.enable_url_detection && signals.url_detected() {
        card.add_sales(URL_WEIGHT, reasons::URL_DETECTED);
    }

    if rules.enable_url_detection && !signals.scheduling_urls.is_empty() {
        card.add_sales(SCHEDULING_WEIGHT, reasons::SCHEDULING_URL);
    }

    let banned = signals.banned_keywords.len();
    if banned > 0 {
        card.add_sales(BANNED_KEYWORD_WEIGHT * banned as f64, reasons::BANNED_KEYWORDS);
    }

    // Site lists may be customised; only built-in keywords earn credit
    let sales = count_builtin(&signals.sales_keywords, DEFAULT_SALES_KEYWORDS);
    if sales > 0 {
        card.add_sales(SALES_KEYWORD_WEIGHT * sales as f64, reasons::SALES_KEYWORDS);
    }

    let spam = count_builtin(&signals.spam_keywords, DEFAULT_SPAM_KEYWORDS);
    if spam > 0 {
        card.add_spam(SPAM_KEYWORD_WEIGHT * spam as f64, reasons::SPAM_KEYWORDS);
    }

    if !signals.blocked_domains.is_empty() {
        card.sales += BLOCKED_DOMAIN_WEIGHT;
        for domain in &signals.blocked_domains {
            card.reasons.push(format!("{}{}", reasons::BLOCKED_DOMAIN_PREFIX, domain));
        }
    }

    if rules.enable_paste_detection && behavior.paste_detected {
        card.add_sales(PASTE_WEIGHT, reasons::PASTE_DETECTED);
    }

    if let Some(secs) = behavior.time_to_submit {
        if secs < FAST_SUBMIT_SECS {
            card.add_spam(FAST_SUBMIT_WEIGHT, reasons::FAST_SUBMISSION);
        }
    }

    card.clamped()
}

/// `0.6 × rule + 0.4 × ai`, each side clamped
pub fn blend(rule: &ScoreCard, ai: &AiScore) -> ScoreCard {
    let ai = ai.clone().clamped();
    let mut reasons = rule.reasons.clone();
    if !ai.reasoning.trim().is_empty() {
        reasons.push(format!("ai:{}", ai.reasoning.trim()));
    }

    ScoreCard {
        sales: clamp_score(RULE_BLEND_WEIGHT * clamp_score(rule.sales) + AI_BLEND_WEIGHT * ai.sales_score),
        spam: clamp_score(RULE_BLEND_WEIGHT * clamp_score(rule.spam) + AI_BLEND_WEIGHT * ai.spam_score),
        reasons,
    }
}

/// Distinct hits that also appear (case-insensitively) in a built-in list
fn count_builtin(hits: &[String], builtin: &[&str]) -> usize {
    let mut seen: Vec<String> = Vec::new();
    for hit in hits {
        let needle = hit.trim().to_lowercase();
        if builtin.iter().any(|b| b.to_lowercase() == needle) && !seen.contains(&needle) {
            seen.push(needle);
        }
    }
    seen.len()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::signals::SignalExtractor;
    use crate::models::form_data;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_scenario_url_plus_two_sales_keywords() {
        let rules = RuleSet::default();
        let signals = SignalExtractor::new(rules.clone())
            .extract(&form_data([("message", "営業提案です。詳細はこちら https://example.com")]));

        let card = score_signals(&signals, &rules, &BehavioralData::default());
        assert!(approx(card.sales, 0.6), "sales = {}", card.sales);
        assert!(approx(card.spam, 0.0));
        assert_eq!(card.reasons, vec![reasons::URL_DETECTED, reasons::SALES_KEYWORDS]);
    }

    #[test]
    fn test_scenario_banned_keyword() {
        let rules = RuleSet::default().with_banned_keywords(vec!["無料".into()]);
        let signals = SignalExtractor::new(rules.clone()).extract(&form_data([("body", "無料相談受付中")]));

        let card = score_signals(&signals, &rules, &BehavioralData::default());
        assert_eq!(signals.banned_keywords, vec!["無料"]);
        assert!(approx(card.sales, 0.2));
    }

    #[test]
    fn test_custom_sales_keywords_earn_no_credit() {
        let rules = RuleSet::default().with_sales_keywords(vec!["widget".into(), "営業".into()]);
        let signals = SignalExtractor::new(rules.clone()).extract(&form_data([("body", "widget 営業")]));

        assert_eq!(signals.sales_keywords.len(), 2);
        let card = score_signals(&signals, &rules, &BehavioralData::default());
        assert!(approx(card.sales, 0.15));
    }

    #[test]
    fn test_blocked_domain_flat_weight_with_reason_per_domain() {
        let rules = RuleSet::default().with_blocked_domains(vec!["a.jp".into(), "b.jp".into()]);
        let signals = SignalExtractor::new(rules.clone())
            .extract(&form_data([("body", "x@a.jp y@mail.b.jp")]));

        let card = score_signals(&signals, &rules, &BehavioralData::default());
        assert!(approx(card.sales, 0.4));
        assert!(card.reasons.contains(&"blocked_domain:a.jp".to_string()));
        assert!(card.reasons.contains(&"blocked_domain:b.jp".to_string()));
    }

    #[test]
    fn test_behavioral_signals() {
        let rules = RuleSet::default();
        let behavior = BehavioralData {
            paste_detected: true,
            time_to_submit: Some(2.5),
        };
        let card = score_signals(&Signals::default(), &rules, &behavior);
        assert!(approx(card.sales, 0.2));
        assert!(approx(card.spam, 0.3));

        let slow = BehavioralData {
            paste_detected: false,
            time_to_submit: Some(5.0),
        };
        let card = score_signals(&Signals::default(), &rules, &slow);
        assert!(approx(card.spam, 0.0));
    }

    #[test]
    fn test_paste_ignored_when_disabled() {
        let rules = RuleSet {
            enable_paste_detection: false,
            ..Default::default()
        };
        let behavior = BehavioralData {
            paste_detected: true,
            time_to_submit: None,
        };
        assert!(approx(score_signals(&Signals::default(), &rules, &behavior).sales, 0.0));
    }

    #[test]
    fn test_scores_always_clamped() {
        let rules = RuleSet::default()
            .with_banned_keywords(vec!["a".into(), "b".into(), "c".into(), "d".into()])
            .with_blocked_domains(vec!["calendly.com".into()]);
        let signals = SignalExtractor::new(rules.clone()).extract(&form_data([(
            "body",
            "a b c d 営業 提案 商談 casino viagra lottery crypto https://calendly.com/x",
        )]));
        let behavior = BehavioralData {
            paste_detected: true,
            time_to_submit: Some(0.1),
        };

        let card = score_signals(&signals, &rules, &behavior);
        assert!(approx(card.sales, 1.0));
        assert!(approx(card.spam, 1.0));
        assert!(card.reasons.contains(&"blocked_domain:calendly.com".to_string()));
    }

    #[test]
    fn test_blend_weights_and_clamp() {
        let rule = ScoreCard {
            sales: 0.6,
            spam: 0.0,
            reasons: vec!["url_detected".into()],
        };
        let ai = AiScore {
            sales_score: 1.5,
            spam_score: -2.0,
            reasoning: "looks like outreach".into(),
        };

        let combined = blend(&rule, &ai);
        assert!(approx(combined.sales, 0.6 * 0.6 + 0.4));
        assert!(approx(combined.spam, 0.0));
        assert_eq!(combined.reasons.last().map(String::as_str), Some("ai:looks like outreach"));
    }

    #[test]
    fn test_blend_with_fallback_is_rule_share_only() {
        let rule = ScoreCard {
            sales: 0.6,
            spam: 0.5,
            reasons: vec![],
        };
        let combined = blend(&rule, &AiScore::fallback(""));
        assert!(approx(combined.sales, 0.36));
        assert!(approx(combined.spam, 0.3));
        assert!(combined.reasons.is_empty());
    }
}
