//! Signal Extractor
//!
//! One derivation (`Signals`) projected two ways: the live
//! `DetectionSnapshot` the agent publishes to the host page, and the
//! `DetectionResult` the cloud scores and stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::FormData;
use super::matching::{match_domains, match_keywords};
use super::normalize::normalize;
use super::rules::RuleSet;
use super::urls::{extract_email_domains, extract_urls, hostname_of, is_scheduling_host};

// ============================================================================
// INTERNAL REPRESENTATION
// ============================================================================

/// Everything derived from one set of field values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signals {
    /// Lowercased matching corpus
    pub corpus: String,
    /// Raw `http(s)://` tokens (including unparseable ones)
    pub urls: Vec<String>,
    /// Hostnames of the parseable tokens
    pub hostnames: Vec<String>,
    /// URLs whose host is a scheduling service
    pub scheduling_urls: Vec<String>,
    pub sales_keywords: Vec<String>,
    pub banned_keywords: Vec<String>,
    pub spam_keywords: Vec<String>,
    pub email_domains: Vec<String>,
    /// Configured blocked domains hit by a hostname or email domain
    pub blocked_domains: Vec<String>,
}

impl Signals {
    pub fn url_detected(&self) -> bool {
        !self.urls.is_empty()
    }

    /// Length of the corpus in characters
    pub fn content_length(&self) -> usize {
        self.corpus.chars().count()
    }
}

/// Deterministic, side-effect-free extraction
#[derive(Debug, Clone, Default)]
pub struct SignalExtractor {
    rules: RuleSet,
}

impl SignalExtractor {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Derive all signals from raw field values
    pub fn extract(&self, data: &FormData) -> Signals {
        let corpus = normalize(data);
        let urls = extract_urls(&corpus);

        let mut hostnames: Vec<String> = Vec::new();
        let mut scheduling_urls = Vec::new();
        for url in &urls {
            let Some(host) = hostname_of(url) else {
                log::debug!("Dropping unparseable url from host set: {}", url);
                continue;
            };
            if is_scheduling_host(&host) {
                scheduling_urls.push(url.clone());
            }
            if !hostnames.contains(&host) {
                hostnames.push(host);
            }
        }

        let email_domains = extract_email_domains(&corpus);

        let mut candidates = hostnames.clone();
        candidates.extend(email_domains.iter().cloned());
        let blocked_domains = match_domains(&candidates, &self.rules.blocked_domains);

        Signals {
            sales_keywords: match_keywords(&corpus, &self.rules.sales_keywords),
            banned_keywords: match_keywords(&corpus, &self.rules.banned_keywords),
            spam_keywords: match_keywords(&corpus, &self.rules.spam_keywords),
            corpus,
            urls,
            hostnames,
            scheduling_urls,
            email_domains,
            blocked_domains,
        }
    }

    /// Client projection
    pub fn snapshot(&self, data: &FormData, paste_detected: bool) -> DetectionSnapshot {
        DetectionSnapshot::from_signals(&self.extract(data), &self.rules, paste_detected, Utc::now())
    }
}

// ============================================================================
// PROJECTIONS
// ============================================================================

/// Live detection state published to the host page.
/// Recomputed from scratch on every input/paste event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSnapshot {
    pub url_detected: bool,
    pub detected_urls: Vec<String>,
    pub scheduling_urls: Vec<String>,
    pub sales_keywords: Vec<String>,
    pub banned_keywords: Vec<String>,
    pub blocked_domains: Vec<String>,
    pub paste_detected: bool,
    pub content_length: usize,
    pub updated_at: DateTime<Utc>,
}

impl DetectionSnapshot {
    pub fn from_signals(
        signals: &Signals,
        rules: &RuleSet,
        paste_detected: bool,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let (detected_urls, scheduling_urls) = if rules.enable_url_detection {
            (signals.urls.clone(), signals.scheduling_urls.clone())
        } else {
            (Vec::new(), Vec::new())
        };

        Self {
            url_detected: !detected_urls.is_empty(),
            detected_urls,
            scheduling_urls,
            sales_keywords: signals.sales_keywords.clone(),
            banned_keywords: signals.banned_keywords.clone(),
            blocked_domains: signals.blocked_domains.clone(),
            paste_detected: paste_detected && rules.enable_paste_detection,
            content_length: signals.content_length(),
            updated_at,
        }
    }
}

/// Server-side detection record (scored and persisted)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub urls: Vec<String>,
    pub hostnames: Vec<String>,
    pub scheduling_urls: Vec<String>,
    pub sales_keywords: Vec<String>,
    pub banned_keywords: Vec<String>,
    pub spam_keywords: Vec<String>,
    pub blocked_domains: Vec<String>,
    pub email_domains: Vec<String>,
}

impl From<&Signals> for DetectionResult {
    fn from(signals: &Signals) -> Self {
        Self {
            urls: signals.urls.clone(),
            hostnames: signals.hostnames.clone(),
            scheduling_urls: signals.scheduling_urls.clone(),
            sales_keywords: signals.sales_keywords.clone(),
            banned_keywords: signals.banned_keywords.clone(),
            spam_keywords: signals.spam_keywords.clone(),
            blocked_domains: signals.blocked_domains.clone(),
            email_domains: signals.email_domains.clone(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
