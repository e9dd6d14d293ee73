use crate::domain::model::{AnalysisReport, KeywordResult, MatchCategory};
use crate::utils::error::{AnalyzerError, Result};
use serde::Serialize;

pub const SUMMARY_HEADER: [&str; 9] = [
    "keyword",
    "prefix_count",
    "prefix_value",
    "suffix_count",
    "suffix_value",
    "substring_count",
    "substring_value",
    "total_count",
    "total_value",
];

/// Whole numbers print without decimals, everything else with two.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn summary_row(result: &KeywordResult) -> Vec<String> {
    let mut row = Vec::with_capacity(SUMMARY_HEADER.len());
    row.push(result.keyword.clone());
    for category in MatchCategory::ALL {
        let bucket = result.category(category);
        row.push(bucket.count().to_string());
        row.push(format_value(bucket.total));
    }
    row.push(result.total_count().to_string());
    row.push(format_value(result.total_value()));
    row
}

pub fn to_delimited(report: &AnalysisReport, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(SUMMARY_HEADER)?;
    for result in &report.results {
        writer.write_record(summary_row(result))?;
    }

    let data = writer.into_inner().map_err(|e| AnalyzerError::ProcessingError {
        message: format!("failed to flush delimited output: {}", e),
    })?;
    String::from_utf8(data).map_err(|e| AnalyzerError::ProcessingError {
        message: format!("delimited output is not UTF-8: {}", e),
    })
}

#[derive(Serialize)]
struct JsonKeyword<'a> {
    #[serde(flatten)]
    result: &'a KeywordResult,
    total_count: usize,
    total_value: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a AnalysisReport,
    keywords: Vec<JsonKeyword<'a>>,
}

/// Full report including matched records. `results` is replaced by
/// `keywords`, which adds the derived totals.
pub fn to_json(report: &AnalysisReport) -> Result<String> {
    let mut value = serde_json::to_value(JsonReport {
        report,
        keywords: report
            .results
            .iter()
            .map(|result| JsonKeyword {
                result,
                total_count: result.total_count(),
                total_value: result.total_value(),
            })
            .collect(),
    })?;
    if let Some(object) = value.as_object_mut() {
        object.remove("results");
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::analyze;
    use crate::domain::model::{DatasetStatus, DomainRecord};
    use chrono::Utc;
    use std::sync::Arc;

    fn sample_report() -> AnalysisReport {
        let records = vec![
            Arc::new(DomainRecord::with_details("apple.com", Some("$1,250".into()), None, None)),
            Arc::new(DomainRecord::with_details("pineapple.net", Some("$99.50".into()), None, None)),
        ];
        AnalysisReport {
            generated_at: Utc::now(),
            dataset_size: records.len(),
            dataset_status: DatasetStatus::Loaded,
            sort: None,
            results: analyze(&["apple", "kiwi"], &records),
        }
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1250.0), "1250");
        assert_eq!(format_value(99.5), "99.50");
        assert_eq!(format_value(0.0), "0");
    }

    #[test]
    fn test_csv_summary() {
        let csv = to_delimited(&sample_report(), b',').unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], SUMMARY_HEADER.join(","));
        assert_eq!(lines[1], "apple,1,1250,1,99.50,0,0,2,1349.50");
        assert_eq!(lines[2], "kiwi,0,0,0,0,0,0,0,0");
    }

    #[test]
    fn test_tsv_summary() {
        let tsv = to_delimited(&sample_report(), b'\t').unwrap();
        assert!(tsv.starts_with("keyword\tprefix_count"));
    }

    #[test]
    fn test_json_report_has_totals_and_matches() {
        let json = to_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["dataset_size"], 2);
        assert!(value.get("results").is_none());
        let apple = &value["keywords"][0];
        assert_eq!(apple["keyword"], "apple");
        assert_eq!(apple["total_count"], 2);
        assert_eq!(apple["prefix"]["matches"][0]["domain"], "apple.com");
        assert_eq!(apple["suffix"]["matches"][0]["label"], "pineapple");
    }
}
