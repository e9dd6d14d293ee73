use crate::domain::model::{DomainRecord, SharedRecord};
use std::sync::Arc;

/// Lowercase token before the first dot: `"Apple.com"` becomes `"apple"`.
pub fn derive_label(domain: &str) -> String {
    let trimmed = domain.trim();
    let root = match trimmed.find('.') {
        Some(dot) => &trimmed[..dot],
        None => trimmed,
    };
    root.to_lowercase()
}

impl DomainRecord {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.trim().to_string(),
            label: derive_label(domain),
            price: None,
            date: None,
            venue: None,
        }
    }

    pub fn with_details(
        domain: &str,
        price: Option<String>,
        date: Option<String>,
        venue: Option<String>,
    ) -> Self {
        Self {
            price,
            date,
            venue,
            ..Self::new(domain)
        }
    }
}

pub fn normalize_domains<I, T>(raw: I) -> Vec<SharedRecord>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    raw.into_iter()
        .map(|domain| Arc::new(DomainRecord::new(domain.as_ref())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_strips_tld_and_lowercases() {
        assert_eq!(derive_label("Apple.com"), "apple");
        assert_eq!(derive_label("  pineapple.co.uk "), "pineapple");
        assert_eq!(derive_label("LOCALHOST"), "localhost");
    }

    #[test]
    fn test_blank_domain_yields_empty_label() {
        assert_eq!(derive_label(""), "");
        assert_eq!(derive_label("   "), "");
        assert_eq!(derive_label(".com"), "");
    }

    #[test]
    fn test_normalize_preserves_order_and_trims_domain() {
        let records = normalize_domains([" b.io", "a.com"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].domain, "b.io");
        assert_eq!(records[0].label, "b");
        assert_eq!(records[1].label, "a");
    }

    #[test]
    fn test_same_domain_same_label() {
        let first = DomainRecord::new("Grape.io");
        let second = DomainRecord::with_details("Grape.io", Some("$10".into()), None, None);
        assert_eq!(first.label, second.label);
        assert_eq!(second.price.as_deref(), Some("$10"));
    }
}
