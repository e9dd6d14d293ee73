pub mod aggregator;
pub mod classifier;
pub mod engine;
pub mod keywords;
pub mod normalizer;
pub mod pipeline;
pub mod ranker;
pub mod report;
pub mod value;

pub use crate::domain::model::{
    AnalysisReport, Dataset, DomainRecord, KeywordResult, MatchCategory, SortSpec,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
