use crate::domain::model::{KeywordResult, SortDirection, SortMetric, SortSpec};
use std::cmp::Ordering;

// Total 也是比較筆數，不比較金額
pub fn metric_count(result: &KeywordResult, metric: SortMetric) -> usize {
    match metric {
        SortMetric::Prefix => result.prefix.count(),
        SortMetric::Suffix => result.suffix.count(),
        SortMetric::Substring => result.substring.count(),
        SortMetric::Total => result.total_count(),
    }
}

// 方向只影響指標，同分時一律以 keyword 遞增
pub fn compare_results(a: &KeywordResult, b: &KeywordResult, spec: &SortSpec) -> Ordering {
    let by_metric = metric_count(a, spec.metric).cmp(&metric_count(b, spec.metric));
    let by_metric = match spec.direction {
        SortDirection::Ascending => by_metric,
        SortDirection::Descending => by_metric.reverse(),
    };
    by_metric.then_with(|| a.keyword.cmp(&b.keyword))
}

/// Stable reorder of `results`; `None` keeps keyword-input order.
pub fn sort_results(mut results: Vec<KeywordResult>, spec: Option<&SortSpec>) -> Vec<KeywordResult> {
    if let Some(spec) = spec {
        results.sort_by(|a, b| compare_results(a, b, spec));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::analyze;
    use crate::core::normalizer::normalize_domains;

    fn keywords(results: &[KeywordResult]) -> Vec<&str> {
        results.iter().map(|r| r.keyword.as_str()).collect()
    }

    fn sample() -> Vec<KeywordResult> {
        let records = normalize_domains([
            "cloud.com",
            "cloudy.io",
            "mycloud.net",
            "shop.com",
            "bestshop.io",
            "data.ai",
            "bigdata.io",
            "metadatabase.org",
        ]);
        analyze(&["data", "zeta", "cloud", "shop"], &records)
    }

    #[test]
    fn test_unset_sort_keeps_input_order() {
        let results = sort_results(sample(), None);
        assert_eq!(keywords(&results), vec!["data", "zeta", "cloud", "shop"]);
    }

    #[test]
    fn test_total_descending_with_keyword_tiebreak() {
        let spec = SortSpec::new(SortMetric::Total, SortDirection::Descending);
        let results = sort_results(sample(), Some(&spec));
        // cloud 3, data 3, shop 2, zeta 0
        assert_eq!(keywords(&results), vec!["cloud", "data", "shop", "zeta"]);
    }

    #[test]
    fn test_tiebreak_ignores_direction() {
        let spec = SortSpec::new(SortMetric::Total, SortDirection::Ascending);
        let results = sort_results(sample(), Some(&spec));
        assert_eq!(keywords(&results), vec!["zeta", "shop", "cloud", "data"]);
    }

    #[test]
    fn test_category_metric_uses_counts() {
        let spec = SortSpec::new(SortMetric::Suffix, SortDirection::Descending);
        let results = sort_results(sample(), Some(&spec));
        // suffix: cloud 1, data 1, shop 1, zeta 0
        assert_eq!(keywords(&results), vec!["cloud", "data", "shop", "zeta"]);

        let spec = SortSpec::new(SortMetric::Substring, SortDirection::Descending);
        let results = sort_results(sample(), Some(&spec));
        // substring: data 1, others 0
        assert_eq!(keywords(&results), vec!["data", "cloud", "shop", "zeta"]);
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let spec = SortSpec::new(SortMetric::Prefix, SortDirection::Ascending);
        let once = sort_results(sample(), Some(&spec));
        let twice = sort_results(once.clone(), Some(&spec));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_tiebreak_is_case_sensitive() {
        let results = analyze(&["beta", "Alpha", "alpha"], &[]);
        let spec = SortSpec::new(SortMetric::Total, SortDirection::Descending);
        let results = sort_results(results, Some(&spec));
        assert_eq!(keywords(&results), vec!["Alpha", "alpha", "beta"]);
    }
}
