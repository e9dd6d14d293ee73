use crate::core::ConfigProvider;
use crate::domain::model::SortSpec;
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// 本地路徑或 http(s) URL
    pub source: String,
    pub domain_column: Option<String>,
    pub price_column: Option<String>,
    pub date_column: Option<String>,
    pub venue_column: Option<String>,
    pub has_headers: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub keywords: Option<Vec<String>>,
    pub keywords_file: Option<String>,
    /// `metric` or `metric:asc|desc`
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    pub compression: Option<bool>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "./output".to_string(),
            formats: vec!["csv".to_string(), "json".to_string()],
            compression: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    /// "compact" (default) or "json"
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnalyzerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let config: Self = toml::from_str(&processed_content).map_err(|e| {
            AnalyzerError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            }
        })?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${DATASET_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AnalyzerError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn parsed_sort(&self) -> Result<Option<SortSpec>> {
        self.analysis
            .sort
            .as_deref()
            .map(|raw| {
                raw.parse::<SortSpec>()
                    .map_err(|reason| AnalyzerError::InvalidConfigValueError {
                        field: "analysis.sort".to_string(),
                        value: raw.to_string(),
                        reason,
                    })
            })
            .transpose()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn dataset_source(&self) -> &str {
        &self.dataset.source
    }

    fn domain_column(&self) -> &str {
        self.dataset.domain_column.as_deref().unwrap_or("1")
    }

    fn price_column(&self) -> &str {
        self.dataset.price_column.as_deref().unwrap_or("price")
    }

    fn date_column(&self) -> &str {
        self.dataset.date_column.as_deref().unwrap_or("date")
    }

    fn venue_column(&self) -> &str {
        self.dataset.venue_column.as_deref().unwrap_or("venue")
    }

    fn has_headers(&self) -> bool {
        self.dataset.has_headers.unwrap_or(true)
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn compress_output(&self) -> bool {
        self.output.compression.unwrap_or(false)
    }

    fn sort_spec(&self) -> Option<SortSpec> {
        // 已在 validate() 檢查過格式
        self.parsed_sort().ok().flatten()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_dataset_source("dataset.source", &self.dataset.source)?;
        validation::validate_non_empty_string("dataset.domain_column", self.domain_column())?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_output_formats("output.formats", &self.output.formats)?;
        self.parsed_sort()?;

        if self.analysis.keywords.is_none() && self.analysis.keywords_file.is_none() {
            return Err(AnalyzerError::MissingConfigError {
                field: "analysis.keywords or analysis.keywords_file".to_string(),
            });
        }

        Ok(())
    }
}
