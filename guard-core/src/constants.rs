//! Built-in Lists & Defaults
//!
//! Single source of truth for the keyword and domain lists shipped with
//! PitchGuard. Sites may override the keyword lists, but the scoring rules
//! only credit matches that also appear in the built-in lists here.

/// Default sales keywords (matched as case-insensitive substrings)
pub const DEFAULT_SALES_KEYWORDS: &[&str] = &[
    "営業",
    "提案",
    "商談",
    "業務提携",
    "協業",
    "導入事例",
    "資料請求",
    "アポイント",
    "代理店",
    "sales",
    "partnership",
    "proposal",
    "lead generation",
    "outsourcing",
    "book a demo",
];

/// Default spam keywords
pub const DEFAULT_SPAM_KEYWORDS: &[&str] = &[
    "casino",
    "viagra",
    "lottery",
    "crypto",
    "bitcoin",
    "payday loan",
    "カジノ",
    "副業",
    "稼げる",
    "当選",
    "出会い",
];

/// Default banned keywords
pub const DEFAULT_BANNED_KEYWORDS: &[&str] = &[
    "今すぐ",
    "期間限定",
    "act now",
    "click here",
];

/// Meeting-booking services; a link to any of these is a sales signal
pub const SCHEDULING_DOMAINS: &[&str] = &[
    "calendly.com",
    "hubspot.com",
    "cal.com",
    "timerex.net",
    "jicoo.com",
    "spirinc.com",
    "youcanbook.me",
    "acuityscheduling.com",
    "savvycal.com",
    "tidycal.com",
    "zcal.co",
    "doodle.com",
];

/// Default sales threshold (challenge tier)
pub const DEFAULT_THRESHOLD_SALES: f64 = 0.7;

/// Default spam threshold (block tier)
pub const DEFAULT_THRESHOLD_SPAM: f64 = 0.85;

/// Width of the hold band below the sales threshold
pub const HOLD_BAND: f64 = 0.2;

/// Helper: own a static list
pub fn to_owned_list(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Parse a comma separated list (env values), dropping blanks
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_drops_blanks() {
        assert_eq!(parse_list(" a, ,b,, c "), vec!["a", "b", "c"]);
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_default_sales_keywords_include_japanese_terms() {
        assert!(DEFAULT_SALES_KEYWORDS.contains(&"営業"));
        assert!(DEFAULT_SALES_KEYWORDS.contains(&"提案"));
    }
}
