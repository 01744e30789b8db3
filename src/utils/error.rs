use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unknown {kind} key '{key}', expected one of: {expected}")]
    UnknownKeyError {
        kind: String,
        key: String,
        expected: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::IoError(_) => ErrorCategory::Io,
            DashboardError::SerializationError(_) | DashboardError::CsvError(_) => {
                ErrorCategory::Data
            }
            DashboardError::ConfigError { .. }
            | DashboardError::ConfigValidationError { .. }
            | DashboardError::InvalidConfigValueError { .. }
            | DashboardError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DashboardError::ValidationError { .. } | DashboardError::UnknownKeyError { .. } => {
                ErrorCategory::Query
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Query => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DashboardError::IoError(_) => {
                "Check that the state file exists and the output directory is writable"
            }
            DashboardError::SerializationError(_) => {
                "Make sure the state file is valid JSON with a top-level 'app' object"
            }
            DashboardError::CsvError(_) => "Check the output path and retry the export",
            DashboardError::ConfigError { .. }
            | DashboardError::ConfigValidationError { .. }
            | DashboardError::InvalidConfigValueError { .. }
            | DashboardError::MissingConfigError { .. } => {
                "Review the configuration values and try again"
            }
            DashboardError::ValidationError { .. } => {
                "Use a page number and page size of at least 1"
            }
            DashboardError::UnknownKeyError { .. } => {
                "Use one of the listed filter or sort keys"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashboardError::IoError(e) => format!("Could not read or write a file: {}", e),
            DashboardError::SerializationError(e) => {
                format!("The dashboard state could not be parsed: {}", e)
            }
            DashboardError::CsvError(e) => format!("Failed to write the course listing: {}", e),
            DashboardError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
