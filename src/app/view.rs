use crate::core::aggregator::analyze;
use crate::core::keywords::parse_keyword_list;
use crate::core::ranker::sort_results;
use crate::domain::model::{
    Dataset, DatasetStatus, DetailCategory, DomainRecord, KeywordResult, SharedRecord,
    SortDirection, SortMetric, SortSpec,
};
use crate::utils::error::{AnalyzerError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSelection {
    pub row: usize,
    pub keyword: String,
    pub category: DetailCategory,
}

#[derive(Debug)]
pub struct DetailView<'a> {
    pub keyword: &'a str,
    pub category: DetailCategory,
    pub records: Vec<&'a DomainRecord>,
}

impl<'a> DetailView<'a> {
    pub fn new(result: &'a KeywordResult, category: DetailCategory) -> Self {
        Self {
            keyword: &result.keyword,
            category,
            records: result.matches(category),
        }
    }
}

/// View state for one analysis session. Results are rebuilt in full on
/// every `analyze`.
pub struct AnalysisSession {
    records: Vec<SharedRecord>,
    status: DatasetStatus,
    keywords: Vec<String>,
    results: Vec<KeywordResult>,
    sort: Option<SortSpec>,
    open_detail: Option<DetailSelection>,
}

impl AnalysisSession {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            records: dataset.records,
            status: dataset.status,
            keywords: Vec::new(),
            results: Vec::new(),
            sort: None,
            open_detail: None,
        }
    }

    pub fn dataset_size(&self) -> usize {
        self.records.len()
    }

    pub fn dataset_status(&self) -> DatasetStatus {
        self.status
    }

    pub fn results(&self) -> &[KeywordResult] {
        &self.results
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn analyze(&mut self, input: &str) -> &[KeywordResult] {
        self.analyze_keywords(parse_keyword_list(input))
    }

    // 重新分析時沿用目前的排序
    pub fn analyze_keywords(&mut self, keywords: Vec<String>) -> &[KeywordResult] {
        self.keywords = keywords;
        self.open_detail = None;
        let results = analyze(&self.keywords, &self.records);
        self.results = sort_results(results, self.sort.as_ref());
        &self.results
    }

    /// `None` restores keyword-input order.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
        self.open_detail = None;
        let results = match sort {
            Some(_) => std::mem::take(&mut self.results),
            None => analyze(&self.keywords, &self.records),
        };
        self.results = sort_results(results, self.sort.as_ref());
    }

    // 同一欄再按一次就反向，換欄從遞減開始
    pub fn sort_by(&mut self, metric: SortMetric) -> SortSpec {
        let direction = match self.sort {
            Some(current) if current.metric == metric => current.direction.reversed(),
            _ => SortDirection::Descending,
        };
        let spec = SortSpec::new(metric, direction);
        self.set_sort(Some(spec));
        spec
    }

    pub fn find_row(&self, keyword: &str) -> Option<usize> {
        self.results
            .iter()
            .position(|result| result.keyword == keyword)
            .or_else(|| {
                self.results
                    .iter()
                    .position(|result| result.keyword.eq_ignore_ascii_case(keyword))
            })
    }

    /// Opens the panel for `row`/`category`, or closes it if that exact
    /// panel is already open. Returns the panel left open, if any.
    pub fn toggle_detail(
        &mut self,
        row: usize,
        category: DetailCategory,
    ) -> Result<Option<DetailView<'_>>> {
        let result = self
            .results
            .get(row)
            .ok_or_else(|| AnalyzerError::CommandError {
                message: format!("row {} does not exist ({} rows)", row + 1, self.results.len()),
            })?;

        let selection = DetailSelection {
            row,
            keyword: result.keyword.clone(),
            category,
        };
        if self.open_detail.as_ref() == Some(&selection) {
            self.open_detail = None;
            return Ok(None);
        }
        if result.count(category) == 0 {
            return Err(AnalyzerError::CommandError {
                message: format!(
                    "no matches in {} for '{}'",
                    category.title().to_lowercase(),
                    result.keyword
                ),
            });
        }

        self.open_detail = Some(selection);
        Ok(self.open_detail())
    }

    pub fn open_detail(&self) -> Option<DetailView<'_>> {
        let selection = self.open_detail.as_ref()?;
        let result = self.results.get(selection.row)?;
        Some(DetailView::new(result, selection.category))
    }
}
