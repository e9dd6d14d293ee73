use domain_analyzer::{
    analyze, classify, normalize_domains, parse_keyword_list, parse_value, sort_results,
    DetailCategory, KeywordResult, MatchCategory, SortDirection, SortMetric, SortSpec,
};

fn domains(result: &KeywordResult, selection: DetailCategory) -> Vec<String> {
    result
        .matches(selection)
        .iter()
        .map(|record| record.domain.clone())
        .collect()
}

fn prefix() -> DetailCategory {
    DetailCategory::Category(MatchCategory::Prefix)
}

fn suffix() -> DetailCategory {
    DetailCategory::Category(MatchCategory::Suffix)
}

fn substring() -> DetailCategory {
    DetailCategory::Category(MatchCategory::Substring)
}

#[test]
fn test_fruit_dataset_end_to_end() {
    let records = normalize_domains(["apple.com", "pineapple.net", "grape.io"]);
    let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["apple", "pineapple", "grape"]);

    let results = analyze(&["apple"], &records);
    let apple = &results[0];

    assert_eq!(domains(apple, prefix()), vec!["apple.com"]);
    assert_eq!(domains(apple, suffix()), vec!["pineapple.net"]);
    assert!(domains(apple, substring()).is_empty());
    assert_eq!(apple.total_count(), 2);
}

#[test]
fn test_precedence_rules() {
    let records = normalize_domains(["aa.com", "a.com"]);
    assert_eq!(classify("a", &records[0]), Some(MatchCategory::Prefix));
    assert_eq!(classify("A", &records[1]), Some(MatchCategory::Prefix));
}

#[test]
fn test_totals_invariant_over_mixed_dataset() {
    let records = normalize_domains([
        "data.ai",
        "bigdata.io",
        "metadatabase.org",
        "database.com",
        "mydata.net",
        "nodata",
        "   ",
        "",
    ]);
    let results = analyze(&["data", "base", "x"], &records);

    for result in &results {
        assert_eq!(
            result.total_count(),
            result.prefix.count() + result.suffix.count() + result.substring.count()
        );
        let mut concatenated = domains(result, prefix());
        concatenated.extend(domains(result, suffix()));
        concatenated.extend(domains(result, substring()));
        assert_eq!(domains(result, DetailCategory::Total), concatenated);
    }

    let data = &results[0];
    assert_eq!(domains(data, prefix()), vec!["data.ai", "database.com"]);
    assert_eq!(domains(data, suffix()), vec!["bigdata.io", "mydata.net", "nodata"]);
    assert_eq!(domains(data, substring()), vec!["metadatabase.org"]);
}

#[test]
fn test_sort_stability_across_directions() {
    let records = normalize_domains(["alpha.com", "beta.com", "gamma.com"]);
    let results = analyze(&["gamma", "alpha", "beta", "zzz"], &records);

    for direction in [SortDirection::Ascending, SortDirection::Descending] {
        let spec = SortSpec::new(SortMetric::Prefix, direction);
        let sorted = sort_results(results.clone(), Some(&spec));
        let order: Vec<&str> = sorted.iter().map(|r| r.keyword.as_str()).collect();

        let tied: Vec<&str> = order.iter().copied().filter(|k| *k != "zzz").collect();
        assert_eq!(tied, vec!["alpha", "beta", "gamma"]);

        let again = sort_results(sorted.clone(), Some(&spec));
        assert_eq!(sorted, again);
    }
}

#[test]
fn test_total_sort_uses_counts_not_values() {
    let records = std::sync::Arc::new(domain_analyzer::DomainRecord::with_details(
        "gold.com",
        Some("$1,000,000".into()),
        None,
        None,
    ));
    let mut dataset = vec![records];
    dataset.extend(normalize_domains(["tin.com", "tinfoil.com", "tiny.io"]));

    let results = analyze(&["gold", "tin"], &dataset);
    let spec = SortSpec::new(SortMetric::Total, SortDirection::Descending);
    let sorted = sort_results(results, Some(&spec));

    assert_eq!(sorted[0].keyword, "tin");
    assert_eq!(sorted[1].keyword, "gold");
    assert!(sorted[1].total_value() > sorted[0].total_value());
}

#[test]
fn test_value_parsing_examples() {
    assert_eq!(parse_value(Some("$1,250")), 1250.0);
    assert_eq!(parse_value(Some("")), 0.0);
    assert_eq!(parse_value(None), 0.0);
    assert_eq!(parse_value(Some("N/A")), 0.0);
}

#[test]
fn test_keyword_text_to_results() {
    let records = normalize_domains(["apple.com"]);
    let keywords = parse_keyword_list("apple\n\n  apple  \nkiwi\n");
    let results = analyze(&keywords, &records);

    let order: Vec<&str> = results.iter().map(|r| r.keyword.as_str()).collect();
    assert_eq!(order, vec!["apple", "apple", "kiwi"]);
}

#[test]
fn test_empty_edges() {
    let records = normalize_domains(["apple.com"]);
    let none: Vec<String> = Vec::new();
    assert!(analyze(&none, &records).is_empty());

    let results = analyze(&["test"], &[]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].total_count(), 0);
    assert_eq!(results[0].total_value(), 0.0);
}
