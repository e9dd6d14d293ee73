pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use app::view::{AnalysisSession, DetailView};
pub use crate::core::aggregator::{aggregate, analyze};
pub use crate::core::classifier::classify;
pub use crate::core::engine::{AnalyzerEngine, EngineOutput};
pub use crate::core::keywords::parse_keyword_list;
pub use crate::core::normalizer::{derive_label, normalize_domains};
pub use crate::core::pipeline::AnalysisPipeline;
pub use crate::core::ranker::sort_results;
pub use crate::core::value::parse_value;
pub use domain::model::{
    AnalysisReport, CategoryMatches, Dataset, DatasetStatus, DetailCategory, DomainRecord,
    KeywordResult, MatchCategory, SharedRecord, SortDirection, SortMetric, SortSpec,
};
pub use utils::error::{AnalyzerError, Result};
