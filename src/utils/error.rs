use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoldbachError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Background task failed: {0}")]
    TaskJoinError(#[from] tokio::task::JoinError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Line {line} is not an integer: '{content}'")]
    InputParseError { line: usize, content: String },

    #[error("No input numbers available")]
    EmptyInputError,

    #[error("Invalid prime bound: {value}")]
    InvalidBound { value: i64 },

    #[error("Invalid Goldbach target: {value}")]
    InvalidTarget { value: i64 },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Input,
    Computation,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GoldbachError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GoldbachError::IoError(_) => ErrorCategory::Io,
            GoldbachError::SerializationError(_) | GoldbachError::CsvError(_) => {
                ErrorCategory::Output
            }
            GoldbachError::ConfigError { .. }
            | GoldbachError::ConfigValidationError { .. }
            | GoldbachError::InvalidConfigValueError { .. }
            | GoldbachError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GoldbachError::InputParseError { .. } | GoldbachError::EmptyInputError => {
                ErrorCategory::Input
            }
            GoldbachError::InvalidBound { .. }
            | GoldbachError::InvalidTarget { .. }
            | GoldbachError::TaskJoinError(_)
            | GoldbachError::ProcessingError { .. } => ErrorCategory::Computation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 可以用空結果取代，不算失敗
            GoldbachError::InvalidBound { .. } | GoldbachError::InvalidTarget { .. } => {
                ErrorSeverity::Low
            }
            GoldbachError::InputParseError { .. }
            | GoldbachError::EmptyInputError
            | GoldbachError::IoError(_) => ErrorSeverity::Medium,
            GoldbachError::ConfigError { .. }
            | GoldbachError::ConfigValidationError { .. }
            | GoldbachError::InvalidConfigValueError { .. }
            | GoldbachError::MissingConfigError { .. }
            | GoldbachError::SerializationError(_)
            | GoldbachError::CsvError(_) => ErrorSeverity::High,
            GoldbachError::TaskJoinError(_) | GoldbachError::ProcessingError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            GoldbachError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            GoldbachError::SerializationError(_) | GoldbachError::CsvError(_) => {
                "Try a different output format (--format text)".to_string()
            }
            GoldbachError::ConfigError { .. } | GoldbachError::ConfigValidationError { .. } => {
                "Review the configuration file syntax and required sections".to_string()
            }
            GoldbachError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and run again", field)
            }
            GoldbachError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
            GoldbachError::InputParseError { line, .. } => {
                format!("Fix line {} so that it contains exactly one integer", line)
            }
            GoldbachError::EmptyInputError => {
                "Pass numbers on the command line or provide an input file".to_string()
            }
            GoldbachError::InvalidBound { .. } => {
                "Use a non-negative bound; negative bounds yield no primes".to_string()
            }
            GoldbachError::InvalidTarget { .. } => {
                "Use even targets of at least 4".to_string()
            }
            GoldbachError::TaskJoinError(_) | GoldbachError::ProcessingError { .. } => {
                "Retry with --generator trial-division and report the issue if it persists"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access a file: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Input problem: {}", self),
            ErrorCategory::Computation => format!("Verification failed: {}", self),
            ErrorCategory::Output => format!("Could not render the report: {}", self),
        }
    }

    /// 對應 CLI 的結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, GoldbachError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_maps_to_exit_code() {
        assert_eq!(GoldbachError::InvalidBound { value: -1 }.exit_code(), 0);
        assert_eq!(GoldbachError::EmptyInputError.exit_code(), 2);
        assert_eq!(
            GoldbachError::MissingConfigError {
                field: "input.path".to_string()
            }
            .exit_code(),
            1
        );
        assert_eq!(
            GoldbachError::ProcessingError {
                message: "out of order".to_string()
            }
            .exit_code(),
            3
        );
    }

    #[test]
    fn test_user_friendly_message_mentions_category() {
        let err = GoldbachError::InputParseError {
            line: 3,
            content: "abc".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.user_friendly_message().starts_with("Input problem"));
        assert!(err.recovery_suggestion().contains("line 3"));
    }
}
