use crate::domain::model::{AnalysisReport, Dataset, SortSpec};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Local CSV path or http(s) URL.
    fn dataset_source(&self) -> &str;
    /// Header name or zero-based column index of the domain field.
    fn domain_column(&self) -> &str;
    fn price_column(&self) -> &str;
    fn date_column(&self) -> &str;
    fn venue_column(&self) -> &str;
    fn has_headers(&self) -> bool;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn compress_output(&self) -> bool;
    fn sort_spec(&self) -> Option<SortSpec>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Dataset>;
    async fn transform(&self, dataset: Dataset) -> Result<AnalysisReport>;
    async fn load(&self, report: &AnalysisReport) -> Result<String>;
}
