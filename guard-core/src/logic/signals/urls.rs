//! URL, Hostname & Email Domain Extraction

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::constants::SCHEDULING_DOMAINS;
use super::matching::{domain_matches, normalize_domain};

/// `http(s)://` tokens; stops at whitespace, quotes, brackets and CJK punctuation
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s"'<>()\[\]{}、。「」（）]+"#).expect("valid url regex")
});

/// Fallback authority capture used when the strict parser rejects a token
static AUTHORITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:[^@/?#\s]*@)?([^/?#:\s]+)").expect("valid authority regex")
});

/// Domain portion of `local@domain` tokens
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-z0-9._%+\-]+@([a-z0-9\-]+(?:\.[a-z0-9\-]+)+)").expect("valid email regex")
});

/// All `http(s)://` tokens in the corpus, deduplicated in order of appearance
pub fn extract_urls(corpus: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for m in URL_RE.find_iter(corpus) {
        let token = m.as_str().to_string();
        if !urls.contains(&token) {
            urls.push(token);
        }
    }
    urls
}

/// Hostname of a URL token: strict parse first, then the authority regex.
/// `None` means the token is unparseable and is left out of the host set.
pub fn hostname_of(token: &str) -> Option<String> {
    if let Ok(url) = Url::parse(token) {
        if let Some(host) = url.host_str() {
            return Some(normalize_domain(host));
        }
    }

    AUTHORITY_RE
        .captures(token)
        .and_then(|caps| caps.get(1))
        .map(|m| normalize_domain(m.as_str()))
        .filter(|host| !host.is_empty())
}

/// True if the host is (a subdomain of) a built-in scheduling service
pub fn is_scheduling_host(host: &str) -> bool {
    SCHEDULING_DOMAINS.iter().any(|domain| domain_matches(host, domain))
}

/// Lowercased, deduplicated email domains found in the corpus
pub fn extract_email_domains(corpus: &str) -> Vec<String> {
    let mut domains: Vec<String> = Vec::new();
    for caps in EMAIL_RE.captures_iter(corpus) {
        if let Some(m) = caps.get(1) {
            let domain = m.as_str().to_lowercase();
            if !domains.contains(&domain) {
                domains.push(domain);
            }
        }
    }
    domains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_urls_dedup_and_stop_chars() {
        let corpus = "see https://example.com/a。and http://foo.jp/x https://example.com/a";
        assert_eq!(extract_urls(corpus), vec!["https://example.com/a", "http://foo.jp/x"]);
    }

    #[test]
    fn test_hostname_strict_parse() {
        assert_eq!(hostname_of("https://www.calendly.com/taro").as_deref(), Some("www.calendly.com"));
        assert_eq!(hostname_of("http://user@example.com:8080/x").as_deref(), Some("example.com"));
    }

    #[test]
    fn test_hostname_fallback_and_drop() {
        // invalid port makes the strict parser fail, authority regex still finds the host
        assert_eq!(hostname_of("http://example.com:99999999/x").as_deref(), Some("example.com"));
        assert_eq!(hostname_of("https://"), None);
    }

    #[test]
    fn test_scheduling_host_matching() {
        assert!(is_scheduling_host("calendly.com"));
        assert!(is_scheduling_host("meetings.hubspot.com"));
        assert!(!is_scheduling_host("notcalendly.com"));
        assert!(!is_scheduling_host("calendly.com.evil.net"));
    }

    #[test]
    fn test_email_domains() {
        let corpus = "contact: taro@sales.example.co.jp or hanako@example.co.jp, taro@sales.example.co.jp";
        assert_eq!(extract_email_domains(corpus), vec!["sales.example.co.jp", "example.co.jp"]);
    }
}
