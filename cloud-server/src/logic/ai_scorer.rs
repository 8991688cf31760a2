//! AI Scorer
//!
//! Opaque external scorer returning sales/spam scores in [0, 1]. Any
//! failure collapses to zero scores with a fallback reasoning, so scoring
//! never fails because of this boundary.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use pitchguard_core::{AiScore, DetectionResult};

use crate::config::AiConfig;

pub const FALLBACK_REASONING: &str = "AI scoring unavailable";

const SYSTEM_PROMPT: &str = "You classify messages sent through website contact forms. \
Reply with a JSON object {\"sales_score\": number, \"spam_score\": number, \"reasoning\": string}. \
sales_score is the likelihood (0 to 1) that the message is an unsolicited sales pitch, \
spam_score the likelihood that it is spam. Keep reasoning under 200 characters.";

/// Longest corpus sent to the model (chars)
const MAX_CORPUS_CHARS: usize = 4_000;

#[async_trait]
pub trait AiScorer: Send + Sync {
    async fn score(&self, corpus: &str, detection: &DetectionResult) -> AiScore;

    fn is_enabled(&self) -> bool;
}

/// Used when no scorer endpoint is configured
pub struct DisabledAiScorer;

#[async_trait]
impl AiScorer for DisabledAiScorer {
    async fn score(&self, _corpus: &str, _detection: &DetectionResult) -> AiScore {
        AiScore::fallback(String::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// OpenAI-compatible chat completion scorer
pub struct HttpAiScorer {
    api_url: String,
    api_key: Option<String>,
    model: String,
    http_client: reqwest::Client,
}

impl HttpAiScorer {
    pub fn new(api_url: String, config: &AiConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            api_url,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            http_client,
        })
    }

    async fn request(&self, corpus: &str, detection: &DetectionResult) -> anyhow::Result<AiScore> {
        let content: String = corpus.chars().take(MAX_CORPUS_CHARS).collect();
        let body = json!({
            "model": self.model,
            "temperature": 0,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": json!({
                    "message": content,
                    "urls": detection.urls,
                    "sales_keywords": detection.sales_keywords,
                    "spam_keywords": detection.spam_keywords,
                }).to_string() },
            ],
        });

        let mut request = self.http_client.post(&self.api_url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let text = response.text().await?;
        parse_completion(&text)
    }
}

#[async_trait]
impl AiScorer for HttpAiScorer {
    async fn score(&self, corpus: &str, detection: &DetectionResult) -> AiScore {
        match self.request(corpus, detection).await {
            Ok(score) => score.clamped(),
            Err(e) => {
                tracing::warn!("AI scorer failed, using fallback: {}", e);
                AiScore::fallback(FALLBACK_REASONING)
            }
        }
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[derive(Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Extract the score object from a chat completion body
pub fn parse_completion(body: &str) -> anyhow::Result<AiScore> {
    let completion: Completion = serde_json::from_str(body)?;
    let content = completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| anyhow::anyhow!("completion has no choices"))?;

    // some models wrap JSON in a fenced block
    let trimmed = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let score: AiScore = serde_json::from_str(trimmed)?;
    if !score.sales_score.is_finite() || !score.spam_score.is_finite() {
        anyhow::bail!("non-finite score");
    }
    Ok(score)
}

/// Scorer for the configuration: HTTP when an endpoint is set, else disabled
pub fn from_config(config: &AiConfig) -> anyhow::Result<Box<dyn AiScorer>> {
    match &config.api_url {
        Some(url) => Ok(Box::new(HttpAiScorer::new(url.clone(), config)?)),
        None => Ok(Box::new(DisabledAiScorer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(content: &str) -> String {
        json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] }).to_string()
    }

    #[test]
    fn test_parse_completion() {
        let body = completion(r#"{"sales_score": 0.8, "spam_score": 0.1, "reasoning": "meeting request"}"#);
        let score = parse_completion(&body).unwrap();
        assert_eq!(score.sales_score, 0.8);
        assert_eq!(score.reasoning, "meeting request");
    }

    #[test]
    fn test_parse_fenced_completion() {
        let body = completion("```json\n{\"sales_score\": 0.2, \"spam_score\": 0.0}\n```");
        let score = parse_completion(&body).unwrap();
        assert_eq!(score.spam_score, 0.0);
        assert!(score.reasoning.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_completion(&completion("I think it is sales")).is_err());
        assert!(parse_completion(r#"{"choices": []}"#).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_scorer_falls_back() {
        let config = AiConfig {
            api_url: Some("http://127.0.0.1:9/v1/chat/completions".into()),
            api_key: None,
            model: "test".into(),
            timeout_ms: 500,
        };
        let scorer = from_config(&config).unwrap();
        assert!(scorer.is_enabled());

        let score = scorer.score("hello", &DetectionResult::default()).await;
        assert_eq!(score, AiScore::fallback(FALLBACK_REASONING));
    }

    #[tokio::test]
    async fn test_disabled_scorer_is_neutral() {
        let score = DisabledAiScorer.score("anything", &DetectionResult::default()).await;
        assert_eq!((score.sales_score, score.spam_score), (0.0, 0.0));
        assert!(score.reasoning.is_empty());
    }
}
