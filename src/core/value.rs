use regex::Regex;
use std::sync::OnceLock;

fn non_numeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9.\-]").expect("static pattern is valid"))
}

/// Numeric magnitude of a value such as `"$1,250"`; unparsable input is `0.0`.
pub fn parse_value(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };

    let cleaned = non_numeric().replace_all(raw, "");
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_strings() {
        assert_eq!(parse_value(Some("$1,250")), 1250.0);
        assert_eq!(parse_value(Some("USD 99.50")), 99.5);
        assert_eq!(parse_value(Some("-$20")), -20.0);
    }

    #[test]
    fn test_missing_or_garbage_is_zero() {
        assert_eq!(parse_value(None), 0.0);
        assert_eq!(parse_value(Some("")), 0.0);
        assert_eq!(parse_value(Some("N/A")), 0.0);
        assert_eq!(parse_value(Some("—")), 0.0);
        assert_eq!(parse_value(Some("1.2.3")), 0.0);
        assert_eq!(parse_value(Some("-")), 0.0);
    }
}
