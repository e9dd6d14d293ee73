use crate::adapters::dataset::{self, ColumnLayout};
use crate::core::aggregator::analyze;
use crate::core::ranker::sort_results;
use crate::core::report;
use crate::core::{AnalysisReport, ConfigProvider, Dataset, Pipeline, Storage};
use crate::utils::error::Result;
use chrono::Utc;
use reqwest::Client;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const ARCHIVE_NAME: &str = "analysis_output.zip";

/// Loads the CSV dataset, analyzes the configured keywords and writes the
/// report files.
pub struct AnalysisPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    keywords: Vec<String>,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> AnalysisPipeline<S, C> {
    pub fn new(storage: S, config: C, keywords: Vec<String>) -> Self {
        Self {
            storage,
            config,
            keywords,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn render_files(&self, report: &AnalysisReport) -> Result<Vec<(String, String)>> {
        let mut files = Vec::new();
        for format in self.config.output_formats() {
            let content = match format.as_str() {
                "csv" => report::to_delimited(report, b',')?,
                "tsv" => report::to_delimited(report, b'\t')?,
                "json" => report::to_json(report)?,
                other => {
                    tracing::warn!("Skipping unsupported output format: {}", other);
                    continue;
                }
            };
            files.push((format!("results.{}", format), content));
        }
        Ok(files)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for AnalysisPipeline<S, C> {
    async fn extract(&self) -> Result<Dataset> {
        let layout = ColumnLayout::from_config(&self.config);
        let source = self.config.dataset_source();

        tracing::debug!("Loading dataset from: {}", source);
        dataset::load_dataset(&self.client, source, &layout).await
    }

    async fn transform(&self, dataset: Dataset) -> Result<AnalysisReport> {
        let sort = self.config.sort_spec();
        let results = analyze(&self.keywords, &dataset.records);
        let results = sort_results(results, sort.as_ref());

        Ok(AnalysisReport {
            generated_at: Utc::now(),
            dataset_size: dataset.len(),
            dataset_status: dataset.status,
            sort,
            results,
        })
    }

    async fn load(&self, report: &AnalysisReport) -> Result<String> {
        let files = self.render_files(report)?;

        if !self.config.compress_output() {
            for (name, content) in &files {
                self.storage.write_file(name, content.as_bytes()).await?;
            }
            tracing::debug!("Wrote {} report files", files.len());
            return Ok(self.config.output_path().to_string());
        }

        tracing::debug!("Creating ZIP file with {} files", files.len());

        // 建立ZIP檔案
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (name, content) in &files {
                zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
                zip.write_all(content.as_bytes())?;
            }
            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(ARCHIVE_NAME, &zip_data).await?;

        Ok(format!("{}/{}", self.config.output_path(), ARCHIVE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DatasetStatus, SortDirection, SortMetric, SortSpec};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.get_file(path).await.ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string()).into()
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        dataset: String,
        formats: Vec<String>,
        zip: bool,
        sort: Option<SortSpec>,
    }

    impl ConfigProvider for MockConfig {
        fn dataset_source(&self) -> &str {
            &self.dataset
        }
        fn domain_column(&self) -> &str {
            "domain"
        }
        fn price_column(&self) -> &str {
            "price"
        }
        fn date_column(&self) -> &str {
            "date"
        }
        fn venue_column(&self) -> &str {
            "venue"
        }
        fn has_headers(&self) -> bool {
            true
        }
        fn output_path(&self) -> &str {
            "./output"
        }
        fn output_formats(&self) -> &[String] {
            &self.formats
        }
        fn compress_output(&self) -> bool {
            self.zip
        }
        fn sort_spec(&self) -> Option<SortSpec> {
            self.sort
        }
    }

    fn config(zip: bool, sort: Option<SortSpec>) -> MockConfig {
        MockConfig {
            dataset: "/missing/sales.csv".to_string(),
            formats: vec!["csv".to_string(), "json".to_string()],
            zip,
            sort,
        }
    }

    fn dataset() -> Dataset {
        Dataset::loaded(crate::core::normalizer::normalize_domains([
            "apple.com",
            "pineapple.net",
            "cloud.io",
            "icloud.com",
            "cloudapple.org",
        ]))
    }

    #[tokio::test]
    async fn test_transform_applies_configured_sort() {
        let spec = SortSpec::new(SortMetric::Total, SortDirection::Descending);
        let pipeline = AnalysisPipeline::new(
            MockStorage::default(),
            config(false, Some(spec)),
            vec!["kiwi".to_string(), "cloud".to_string(), "apple".to_string()],
        );

        let report = pipeline.transform(dataset()).await.unwrap();
        let order: Vec<&str> = report.results.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(order, vec!["apple", "cloud", "kiwi"]);
        assert_eq!(report.sort, Some(spec));
        assert_eq!(report.dataset_size, 5);
    }

    #[tokio::test]
    async fn test_missing_dataset_still_produces_rows() {
        let pipeline = AnalysisPipeline::new(
            MockStorage::default(),
            config(false, None),
            vec!["test".to_string()],
        );

        let dataset = pipeline.extract().await.unwrap();
        assert_eq!(dataset.status, DatasetStatus::Unavailable);

        let report = pipeline.transform(dataset).await.unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].total_count(), 0);
    }

    #[tokio::test]
    async fn test_load_writes_each_format() {
        let storage = MockStorage::default();
        let pipeline = AnalysisPipeline::new(storage.clone(), config(false, None), vec!["apple".to_string()]);

        let report = pipeline.transform(dataset()).await.unwrap();
        let output = pipeline.load(&report).await.unwrap();
        assert_eq!(output, "./output");

        let csv = String::from_utf8(storage.get_file("results.csv").await.unwrap()).unwrap();
        assert!(csv.contains("apple,1,0,2,0,0,0,3,0"));
        assert!(storage.get_file("results.json").await.is_some());
        assert!(storage.get_file("results.tsv").await.is_none());
    }

    #[tokio::test]
    async fn test_load_bundles_zip() {
        let storage = MockStorage::default();
        let pipeline = AnalysisPipeline::new(storage.clone(), config(true, None), vec!["apple".to_string()]);

        let report = pipeline.transform(dataset()).await.unwrap();
        let output = pipeline.load(&report).await.unwrap();
        assert!(output.ends_with(ARCHIVE_NAME));

        let zip_data = storage.get_file(ARCHIVE_NAME).await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"results.csv"));
        assert!(names.contains(&"results.json"));
    }
}
