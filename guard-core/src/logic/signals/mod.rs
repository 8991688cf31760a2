//! Signals Module
//!
//! Turns untrusted form field values into a normalized corpus and derives
//! URLs, hostnames, email domains and keyword/domain matches.
//!
//! ## Structure
//! - `normalize`: corpus construction
//! - `urls`: URL/hostname/email-domain extraction, scheduling hosts
//! - `matching`: substring keyword match, suffix domain match
//! - `rules`: lists and toggles
//! - `extractor`: `SignalExtractor`, `Signals` and its two projections

pub mod normalize;
pub mod urls;
pub mod matching;
pub mod rules;
pub mod extractor;

pub use extractor::{DetectionResult, DetectionSnapshot, SignalExtractor, Signals};
pub use matching::{domain_matches, match_domains, match_keywords, normalize_domain};
pub use normalize::normalize;
pub use rules::RuleSet;
pub use urls::{extract_email_domains, extract_urls, hostname_of, is_scheduling_host};
