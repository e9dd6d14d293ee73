use crate::domain::model::{DomainRecord, MatchCategory};

// 優先順序：prefix > suffix > substring；keyword 需已轉小寫
pub fn classify_lowered(lower_keyword: &str, record: &DomainRecord) -> Option<MatchCategory> {
    let label = record.label.as_str();
    if label.starts_with(lower_keyword) {
        Some(MatchCategory::Prefix)
    } else if label.ends_with(lower_keyword) {
        Some(MatchCategory::Suffix)
    } else if label.contains(lower_keyword) {
        Some(MatchCategory::Substring)
    } else {
        None
    }
}

pub fn classify(keyword: &str, record: &DomainRecord) -> Option<MatchCategory> {
    classify_lowered(&keyword.to_lowercase(), record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(domain: &str) -> DomainRecord {
        DomainRecord::new(domain)
    }

    #[test]
    fn test_exact_label_is_prefix() {
        assert_eq!(classify("apple", &record("apple.com")), Some(MatchCategory::Prefix));
    }

    #[test]
    fn test_prefix_wins_over_suffix() {
        assert_eq!(classify("a", &record("aa.net")), Some(MatchCategory::Prefix));
    }

    #[test]
    fn test_suffix_and_substring() {
        assert_eq!(classify("apple", &record("pineapple.net")), Some(MatchCategory::Suffix));
        assert_eq!(classify("nea", &record("pineapple.net")), Some(MatchCategory::Substring));
    }

    #[test]
    fn test_keyword_case_is_ignored() {
        assert_eq!(classify("APPLE", &record("Apple.com")), Some(MatchCategory::Prefix));
    }

    #[test]
    fn test_tld_is_not_matched() {
        assert_eq!(classify("com", &record("apple.com")), None);
        assert_eq!(classify("grape", &record("apple.com")), None);
    }

    #[test]
    fn test_empty_label_never_matches() {
        assert_eq!(classify("a", &record("   ")), None);
    }
}
