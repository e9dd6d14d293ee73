use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// One dataset row. `label` is what keywords are matched against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub domain: String,
    pub label: String,
    pub price: Option<String>,
    pub date: Option<String>,
    pub venue: Option<String>,
}

pub type SharedRecord = Arc<DomainRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchCategory {
    Prefix,
    Suffix,
    Substring,
}

impl MatchCategory {
    pub const ALL: [MatchCategory; 3] = [
        MatchCategory::Prefix,
        MatchCategory::Suffix,
        MatchCategory::Substring,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            MatchCategory::Prefix => "Prefix",
            MatchCategory::Suffix => "Suffix",
            MatchCategory::Substring => "Substring",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailCategory {
    Category(MatchCategory),
    Total,
}

impl DetailCategory {
    pub fn title(&self) -> &'static str {
        match self {
            DetailCategory::Category(category) => category.title(),
            DetailCategory::Total => "Total",
        }
    }
}

impl FromStr for DetailCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" => Ok(DetailCategory::Category(MatchCategory::Prefix)),
            "suffix" => Ok(DetailCategory::Category(MatchCategory::Suffix)),
            "substring" | "exact" => Ok(DetailCategory::Category(MatchCategory::Substring)),
            "total" | "all" => Ok(DetailCategory::Total),
            other => Err(format!(
                "unknown category '{}', expected prefix, suffix, substring or total",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryMatches {
    pub matches: Vec<SharedRecord>,
    pub total: f64,
}

impl CategoryMatches {
    pub fn count(&self) -> usize {
        self.matches.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordResult {
    pub keyword: String,
    pub prefix: CategoryMatches,
    pub suffix: CategoryMatches,
    pub substring: CategoryMatches,
}

impl KeywordResult {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            prefix: CategoryMatches::default(),
            suffix: CategoryMatches::default(),
            substring: CategoryMatches::default(),
        }
    }

    pub fn category(&self, category: MatchCategory) -> &CategoryMatches {
        match category {
            MatchCategory::Prefix => &self.prefix,
            MatchCategory::Suffix => &self.suffix,
            MatchCategory::Substring => &self.substring,
        }
    }

    pub fn category_mut(&mut self, category: MatchCategory) -> &mut CategoryMatches {
        match category {
            MatchCategory::Prefix => &mut self.prefix,
            MatchCategory::Suffix => &mut self.suffix,
            MatchCategory::Substring => &mut self.substring,
        }
    }

    pub fn total_count(&self) -> usize {
        self.prefix.count() + self.suffix.count() + self.substring.count()
    }

    pub fn total_value(&self) -> f64 {
        self.prefix.total + self.suffix.total + self.substring.total
    }

    // prefix、suffix、substring 依序串接
    pub fn total_matches(&self) -> impl Iterator<Item = &SharedRecord> + '_ {
        self.prefix
            .matches
            .iter()
            .chain(self.suffix.matches.iter())
            .chain(self.substring.matches.iter())
    }

    pub fn matches(&self, selection: DetailCategory) -> Vec<&DomainRecord> {
        match selection {
            DetailCategory::Category(category) => self
                .category(category)
                .matches
                .iter()
                .map(|record| record.as_ref())
                .collect(),
            DetailCategory::Total => self.total_matches().map(|record| record.as_ref()).collect(),
        }
    }

    pub fn count(&self, selection: DetailCategory) -> usize {
        match selection {
            DetailCategory::Category(category) => self.category(category).count(),
            DetailCategory::Total => self.total_count(),
        }
    }

    pub fn value(&self, selection: DetailCategory) -> f64 {
        match selection {
            DetailCategory::Category(category) => self.category(category).total,
            DetailCategory::Total => self.total_value(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMetric {
    Prefix,
    Suffix,
    Substring,
    Total,
}

impl SortMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMetric::Prefix => "prefix",
            SortMetric::Suffix => "suffix",
            SortMetric::Substring => "substring",
            SortMetric::Total => "total",
        }
    }
}

impl FromStr for SortMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" => Ok(SortMetric::Prefix),
            "suffix" => Ok(SortMetric::Suffix),
            "substring" | "exact" => Ok(SortMetric::Substring),
            "total" => Ok(SortMetric::Total),
            other => Err(format!(
                "unknown sort metric '{}', expected prefix, suffix, substring or total",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction '{}', expected asc or desc", other)),
        }
    }
}

/// An active ordering request. "No sort" is `Option::<SortSpec>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub metric: SortMetric,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(metric: SortMetric, direction: SortDirection) -> Self {
        Self { metric, direction }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.metric.as_str(), self.direction.as_str())
    }
}

// 未指定方向時預設遞減
impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (metric, direction) = match s.split_once(':') {
            Some((metric, direction)) => (
                metric.parse::<SortMetric>()?,
                direction.parse::<SortDirection>()?,
            ),
            None => (s.parse::<SortMetric>()?, SortDirection::Descending),
        };
        Ok(Self { metric, direction })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetStatus {
    Loaded,
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<SharedRecord>,
    pub status: DatasetStatus,
}

impl Dataset {
    pub fn unavailable() -> Self {
        Self {
            records: Vec::new(),
            status: DatasetStatus::Unavailable,
        }
    }

    pub fn loaded(records: Vec<SharedRecord>) -> Self {
        Self {
            records,
            status: DatasetStatus::Loaded,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub dataset_size: usize,
    pub dataset_status: DatasetStatus,
    pub sort: Option<SortSpec>,
    pub results: Vec<KeywordResult>,
}
