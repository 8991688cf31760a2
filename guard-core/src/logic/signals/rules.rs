//! Rule Set
//!
//! Keyword/domain lists and feature toggles an extractor runs with.
//! Configuration only, no matching logic.

use serde::{Deserialize, Serialize};

use crate::constants::{
    to_owned_list, DEFAULT_BANNED_KEYWORDS, DEFAULT_SALES_KEYWORDS, DEFAULT_SPAM_KEYWORDS,
};

/// Lists and toggles used for one extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Sales keywords (substring match)
    pub sales_keywords: Vec<String>,
    /// Banned keywords (substring match)
    pub banned_keywords: Vec<String>,
    /// Spam keywords (substring match)
    pub spam_keywords: Vec<String>,
    /// Blocked domains (equality or subdomain)
    pub blocked_domains: Vec<String>,
    /// Report and score URLs
    pub enable_url_detection: bool,
    /// Score the paste signal
    pub enable_paste_detection: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            sales_keywords: to_owned_list(DEFAULT_SALES_KEYWORDS),
            banned_keywords: to_owned_list(DEFAULT_BANNED_KEYWORDS),
            spam_keywords: to_owned_list(DEFAULT_SPAM_KEYWORDS),
            blocked_domains: Vec::new(),
            enable_url_detection: true,
            enable_paste_detection: true,
        }
    }
}

impl RuleSet {
    /// Replace the sales list
    pub fn with_sales_keywords(mut self, keywords: Vec<String>) -> Self {
        self.sales_keywords = keywords;
        self
    }

    /// Replace the banned list
    pub fn with_banned_keywords(mut self, keywords: Vec<String>) -> Self {
        self.banned_keywords = keywords;
        self
    }

    /// Replace the blocked domain list
    pub fn with_blocked_domains(mut self, domains: Vec<String>) -> Self {
        self.blocked_domains = domains;
        self
    }
}
