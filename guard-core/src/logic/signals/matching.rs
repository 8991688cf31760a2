//! Keyword & Domain Matching
//!
//! Keywords are matched as case-insensitive substrings of the corpus with no
//! word-boundary check ("sales" also hits "wholesales"). Domains match on
//! equality or a dot-suffixed subdomain.

/// Trim, lowercase, drop a trailing root dot
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_lowercase()
}

/// `candidate` equals `domain` or is a subdomain of it
pub fn domain_matches(candidate: &str, domain: &str) -> bool {
    let candidate = normalize_domain(candidate);
    let domain = normalize_domain(domain);
    if candidate.is_empty() || domain.is_empty() {
        return false;
    }
    candidate == domain || candidate.ends_with(&format!(".{}", domain))
}

/// Keywords from `list` contained in the (already lowercased) corpus.
/// Reported once each, in list order, using the configured spelling.
pub fn match_keywords(corpus: &str, list: &[String]) -> Vec<String> {
    let mut hits: Vec<String> = Vec::new();
    for keyword in list {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }
        if corpus.contains(&needle) && !hits.iter().any(|h| h.trim().to_lowercase() == needle) {
            hits.push(keyword.trim().to_string());
        }
    }
    hits
}

/// Configured domains matched by any candidate, each reported once
pub fn match_domains(candidates: &[String], list: &[String]) -> Vec<String> {
    let mut hits: Vec<String> = Vec::new();
    for domain in list {
        let normalized = normalize_domain(domain);
        if normalized.is_empty() || hits.contains(&normalized) {
            continue;
        }
        if candidates.iter().any(|c| domain_matches(c, &normalized)) {
            hits.push(normalized);
        }
    }
    hits
}
