//! Evaluator HTTP Client
//!
//! JSON POST to the cloud evaluator. Any non-2xx status, transport failure
//! or unparseable body is a `TransportError`; a well-formed body is returned
//! as is, including `success:false`.

use std::time::Duration;

use pitchguard_core::{EvaluateRequest, EvaluateResponse};

use crate::config::{ConfigError, EmbedConfig};
use crate::error::TransportError;
use super::RemoteEvaluator;

/// Evaluator client configuration
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    pub evaluate_url: String,
    pub timeout: Duration,
}

impl From<&EmbedConfig> for EvaluatorConfig {
    fn from(config: &EmbedConfig) -> Self {
        Self {
            evaluate_url: config.evaluate_url(),
            timeout: Duration::from_millis(config.evaluate_timeout_ms),
        }
    }
}

/// Evaluator over HTTP
pub struct HttpEvaluator {
    config: EvaluatorConfig,
    http_client: reqwest::Client,
}

impl HttpEvaluator {
    pub fn new(config: EvaluatorConfig) -> Result<Self, ConfigError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::InvalidUrl(format!("{} ({})", config.evaluate_url, e)))?;

        Ok(Self { config, http_client })
    }

    pub fn evaluate_url(&self) -> &str {
        &self.config.evaluate_url
    }
}

#[async_trait::async_trait(?Send)]
impl RemoteEvaluator for HttpEvaluator {
    async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse, TransportError> {
        let response = self.http_client
            .post(&self.config.evaluate_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(self.config.timeout)
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("Evaluator returned {}: {}", status.as_u16(), error_text);
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.text().await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        parse_response(&body)
    }
}

/// Parse a 2xx body
pub fn parse_response(body: &str) -> Result<EvaluateResponse, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::Parse(e.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
