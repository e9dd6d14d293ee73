use crate::core::classifier::classify_lowered;
use crate::core::value::parse_value;
use crate::domain::model::{KeywordResult, SharedRecord};
use std::sync::Arc;

/// Buckets every record matching `keyword` and sums each bucket's price.
pub fn aggregate(keyword: &str, records: &[SharedRecord]) -> KeywordResult {
    let lower_keyword = keyword.to_lowercase();
    let mut result = KeywordResult::new(keyword);

    for record in records {
        let Some(category) = classify_lowered(&lower_keyword, record) else {
            continue;
        };
        let bucket = result.category_mut(category);
        bucket.matches.push(Arc::clone(record));
        bucket.total += parse_value(record.price.as_deref());
    }

    result
}

/// One result per keyword, in input order. Duplicates are kept; keywords
/// that are blank after trimming are skipped.
pub fn analyze<S: AsRef<str>>(keywords: &[S], records: &[SharedRecord]) -> Vec<KeywordResult> {
    let results: Vec<KeywordResult> = keywords
        .iter()
        .filter_map(|keyword| {
            let keyword: &str = keyword.as_ref();
            (!keyword.trim().is_empty()).then(|| aggregate(keyword, records))
        })
        .collect();

    tracing::debug!(
        "Analyzed {} keywords against {} records",
        results.len(),
        records.len()
    );
    results
}
