pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{DetailCategory, SortSpec};
#[cfg(feature = "cli")]
use crate::utils::error::{AnalyzerError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "domain-analyzer")]
#[command(about = "Classify keywords against a dataset of sold domain names")]
pub struct CliConfig {
    /// CSV dataset: local path or http(s) URL
    #[arg(long, default_value = "unreported_sales.csv")]
    pub dataset: String,

    /// Header name or zero-based index of the domain column
    #[arg(long, default_value = "1")]
    pub domain_column: String,

    #[arg(long, default_value = "price")]
    pub price_column: String,

    #[arg(long, default_value = "date")]
    pub date_column: String,

    #[arg(long, default_value = "venue")]
    pub venue_column: String,

    /// The first CSV row is data, not a header
    #[arg(long)]
    pub no_headers: bool,

    /// File with one keyword per line
    #[arg(long)]
    pub keywords_file: Option<String>,

    /// Keyword to analyze (repeatable); stdin is read when no keywords are given
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Sort as metric[:asc|desc], metric is prefix, suffix, substring or total
    #[arg(long)]
    pub sort: Option<SortSpec>,

    /// Show matches as keyword:category (repeatable)
    #[arg(long = "detail", value_parser = parse_detail_request)]
    pub details: Vec<(String, DetailCategory)>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    /// Bundle report files into a single zip archive
    #[arg(long)]
    pub zip: bool,

    /// Start an interactive session after loading the dataset
    #[arg(long)]
    pub interactive: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

/// `keyword:category`, split on the last colon so keywords may contain one.
#[cfg(feature = "cli")]
pub fn parse_detail_request(raw: &str) -> std::result::Result<(String, DetailCategory), String> {
    let (keyword, category) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected keyword:category, got '{}'", raw))?;
    if keyword.trim().is_empty() {
        return Err("keyword must not be empty".to_string());
    }
    Ok((keyword.trim().to_string(), category.parse()?))
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn dataset_source(&self) -> &str {
        &self.dataset
    }

    fn domain_column(&self) -> &str {
        &self.domain_column
    }

    fn price_column(&self) -> &str {
        &self.price_column
    }

    fn date_column(&self) -> &str {
        &self.date_column
    }

    fn venue_column(&self) -> &str {
        &self.venue_column
    }

    fn has_headers(&self) -> bool {
        !self.no_headers
    }

    fn output_path(&self) -> &str {
        &self.output_path
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

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_dataset_source("dataset", &self.dataset)?;
        validation::validate_non_empty_string("domain_column", &self.domain_column)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;

        if self.no_headers && self.domain_column.trim().parse::<usize>().is_err() {
            return Err(AnalyzerError::InvalidConfigValueError {
                field: "domain_column".to_string(),
                value: self.domain_column.clone(),
                reason: "Named columns need a header row; use an index with --no-headers"
                    .to_string(),
            });
        }

        Ok(())
    }
}
