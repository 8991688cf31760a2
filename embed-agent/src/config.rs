//! Embed Configuration
//!
//! The configuration surface a host page passes to `init`. Immutable for
//! the lifetime of one `Guard`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pitchguard_core::RuleSet;

use crate::constants;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("api key is missing")]
    MissingApiKey,
    #[error("invalid evaluator url '{0}'")]
    InvalidUrl(String),
}

/// List overrides for live detection (replace the built-in lists)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugRules {
    pub sales_keywords: Option<Vec<String>>,
    pub banned_keywords: Option<Vec<String>>,
    pub blocked_domains: Option<Vec<String>>,
}

/// Agent configuration (camelCase so a host can pass its embed JSON as is)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbedConfig {
    /// Site API key (required)
    pub api_key: String,
    pub api_base_url: String,
    pub evaluate_path: String,
    /// Form match expression
    pub selector: String,
    /// Verbose logging of detection snapshots and decisions
    pub debug: bool,
    /// Run the full flow but never perform the real submission
    pub preview_mode: bool,
    pub debug_rules: Option<DebugRules>,
    pub enable_url_detection: bool,
    pub enable_paste_detection: bool,
    /// Rescan when the document reports added nodes
    pub observe_mutations: bool,
    /// Polling rescan period; `None` disables polling
    pub discovery_interval_ms: Option<u64>,
    /// Polling stops this long after discovery starts
    pub discovery_timeout_ms: u64,
    /// Bound on one evaluator call; expiry fails open
    pub evaluate_timeout_ms: u64,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: constants::get_api_base_url(),
            evaluate_path: constants::DEFAULT_EVALUATE_PATH.to_string(),
            selector: constants::DEFAULT_SELECTOR.to_string(),
            debug: false,
            preview_mode: false,
            debug_rules: None,
            enable_url_detection: true,
            enable_paste_detection: true,
            observe_mutations: true,
            discovery_interval_ms: None,
            discovery_timeout_ms: constants::DEFAULT_DISCOVERY_TIMEOUT_MS,
            evaluate_timeout_ms: constants::get_evaluate_timeout_ms(),
        }
    }
}

impl EmbedConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !self.evaluate_url().starts_with("http://") && !self.evaluate_url().starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.evaluate_url()));
        }
        Ok(())
    }

    /// Full evaluator endpoint
    pub fn evaluate_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.evaluate_path.trim_start_matches('/')
        )
    }

    /// Rules for live detection: built-in lists unless overridden
    pub fn rule_set(&self) -> RuleSet {
        let mut rules = RuleSet {
            enable_url_detection: self.enable_url_detection,
            enable_paste_detection: self.enable_paste_detection,
            ..Default::default()
        };
        if let Some(overrides) = &self.debug_rules {
            if let Some(list) = &overrides.sales_keywords {
                rules.sales_keywords = list.clone();
            }
            if let Some(list) = &overrides.banned_keywords {
                rules.banned_keywords = list.clone();
            }
            if let Some(list) = &overrides.blocked_domains {
                rules.blocked_domains = list.clone();
            }
        }
        rules
    }
}
