use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Dataset request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Dataset error: {message}")]
    DatasetError { message: String },

    #[error("Invalid command: {message}")]
    CommandError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Dataset,
    Network,
    Output,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnalyzerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyzerError::ConfigError { .. }
            | AnalyzerError::MissingConfigError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AnalyzerError::CsvError(_) | AnalyzerError::DatasetError { .. } => {
                ErrorCategory::Dataset
            }
            AnalyzerError::HttpError(_) => ErrorCategory::Network,
            AnalyzerError::ZipError(_)
            | AnalyzerError::IoError(_)
            | AnalyzerError::SerializationError(_)
            | AnalyzerError::ProcessingError { .. } => ErrorCategory::Output,
            AnalyzerError::CommandError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AnalyzerError::CommandError { .. } => ErrorSeverity::Low,
            AnalyzerError::HttpError(_) => ErrorSeverity::Medium,
            AnalyzerError::CsvError(_)
            | AnalyzerError::DatasetError { .. }
            | AnalyzerError::ConfigError { .. }
            | AnalyzerError::MissingConfigError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::ConfigValidationError { .. }
            | AnalyzerError::ProcessingError { .. } => ErrorSeverity::High,
            AnalyzerError::ZipError(_)
            | AnalyzerError::IoError(_)
            | AnalyzerError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command line flags or the TOML configuration file"
            }
            ErrorCategory::Dataset => {
                "Make sure the dataset is a readable CSV file with a domain column"
            }
            ErrorCategory::Network => "Check the dataset URL and your network connection, then retry",
            ErrorCategory::Output => "Check that the output path exists and is writable",
            ErrorCategory::Input => "Type 'help' to list the available commands",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AnalyzerError::CsvError(e) => format!("Failed to load dataset: {}", e),
            AnalyzerError::DatasetError { message } => format!("Failed to load dataset: {}", message),
            AnalyzerError::HttpError(e) => format!("Could not download the dataset: {}", e),
            AnalyzerError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            AnalyzerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_errors_are_high_severity() {
        let err = AnalyzerError::DatasetError {
            message: "bad header".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Dataset);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("bad header"));
    }

    #[test]
    fn test_command_errors_are_recoverable() {
        let err = AnalyzerError::CommandError {
            message: "unknown command 'foo'".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.recovery_suggestion().contains("help"));
    }
}
