//! Configuration module
//!
//! Everything comes from the environment (`.env` is loaded by `main`).
//! List values are comma separated.

use std::env;

use anyhow::Context;
use sha2::{Digest, Sha256};

use pitchguard_core::constants::{parse_list, DEFAULT_THRESHOLD_SALES, DEFAULT_THRESHOLD_SPAM};
use pitchguard_core::{RuleSet, Thresholds};

/// AI scorer endpoint (OpenAI-compatible chat completions)
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_ms: u64,
}

impl AiConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_url.is_some()
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres URL; submissions stay in memory when unset
    pub database_url: Option<String>,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// SHA-256 fingerprints of the accepted site API keys
    pub api_key_hashes: Vec<String>,

    pub thresholds: Thresholds,

    /// Server-side detection rules
    pub rules: RuleSet,

    pub ai: AiConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let thresholds = Thresholds::new(
            parse_number(var("THRESHOLD_SALES"), DEFAULT_THRESHOLD_SALES, "THRESHOLD_SALES")?,
            parse_number(var("THRESHOLD_SPAM"), DEFAULT_THRESHOLD_SPAM, "THRESHOLD_SPAM")?,
        )?;

        let mut rules = RuleSet::default();
        if let Some(list) = var("SALES_KEYWORDS") {
            rules.sales_keywords = parse_list(&list);
        }
        if let Some(list) = var("BANNED_KEYWORDS") {
            rules.banned_keywords = parse_list(&list);
        }
        if let Some(list) = var("SPAM_KEYWORDS") {
            rules.spam_keywords = parse_list(&list);
        }
        if let Some(list) = var("BLOCKED_DOMAINS") {
            rules.blocked_domains = parse_list(&list);
        }
        rules.enable_url_detection = parse_flag(var("ENABLE_URL_DETECTION"), true);
        rules.enable_paste_detection = parse_flag(var("ENABLE_PASTE_DETECTION"), true);

        Ok(Self {
            database_url: var("DATABASE_URL"),

            port: parse_number(var("PORT"), 8080, "PORT")?,

            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),

            api_key_hashes: var("PITCHGUARD_API_KEYS")
                .map(|raw| parse_list(&raw).iter().map(|key| fingerprint(key)).collect())
                .unwrap_or_default(),

            thresholds,
            rules,

            ai: AiConfig {
                api_url: var("AI_API_URL"),
                api_key: var("AI_API_KEY"),
                model: var("AI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
                timeout_ms: parse_number(var("AI_TIMEOUT_MS"), 5_000, "AI_TIMEOUT_MS")?,
            },
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether `api_key` belongs to a configured site. With no keys
    /// configured every key is accepted outside production.
    pub fn accepts(&self, api_key: &str) -> bool {
        if self.api_key_hashes.is_empty() {
            return !self.is_production();
        }
        let hash = fingerprint(api_key);
        self.api_key_hashes.iter().any(|known| *known == hash)
    }
}

/// Hex SHA-256 of an API key; the only form in which keys are logged or stored
pub fn fingerprint(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.trim().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// First 12 hex chars of the fingerprint, for log lines
pub fn short_fingerprint(api_key: &str) -> String {
    fingerprint(api_key)[..12].to_string()
}

fn parse_number<T: std::str::FromStr>(raw: Option<String>, default: T, key: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value.trim().parse().with_context(|| format!("invalid {}: '{}'", key, value)),
        None => Ok(default),
    }
}

fn parse_flag(raw: Option<String>, default: bool) -> bool {
    match raw.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if v == "1" || v == "true" || v == "yes" || v == "on" => true,
        Some(v) if v == "0" || v == "false" || v == "no" || v == "off" => false,
        _ => default,
    }
}
