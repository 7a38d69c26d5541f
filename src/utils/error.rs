use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Input is not valid UTF-8 text: {0}")]
    DecodeError(#[from] std::str::Utf8Error),

    #[error("CSV parse error on line {line}: {message}")]
    ParseError { line: u64, message: String },

    #[error("Input has no header row")]
    EmptyInputError,

    #[error("Row on line {line} has {found} fields but the header has {expected}")]
    RowLengthError {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Not found: {message}")]
    NotFoundError { message: String },
}

impl From<csv::Error> for ConvertError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        ConvertError::ParseError {
            line,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::DecodeError(_)
            | ConvertError::ParseError { .. }
            | ConvertError::EmptyInputError
            | ConvertError::RowLengthError { .. }
            | ConvertError::ValidationError { .. } => ErrorCategory::Input,
            ConvertError::ConfigError { .. } | ConvertError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ConvertError::IoError(_) | ConvertError::NotFoundError { .. } => {
                ErrorCategory::Storage
            }
            ConvertError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConvertError::NotFoundError { .. } => ErrorSeverity::Low,
            ConvertError::DecodeError(_)
            | ConvertError::ParseError { .. }
            | ConvertError::EmptyInputError
            | ConvertError::RowLengthError { .. }
            | ConvertError::ValidationError { .. } => ErrorSeverity::Medium,
            ConvertError::ConfigError { .. } | ConvertError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            ConvertError::IoError(_) | ConvertError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Whether the failure was caused by the submitted data rather than the service.
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::DecodeError(_) => "Save the file as UTF-8 and upload it again",
            ConvertError::ParseError { .. } => {
                "Check the reported line for unbalanced or misplaced double quotes"
            }
            ConvertError::EmptyInputError => "Add a header row naming the columns",
            ConvertError::RowLengthError { .. } => {
                "Remove the extra fields or quote values that contain the delimiter"
            }
            ConvertError::ValidationError { .. } => "Upload a file with a .csv extension",
            ConvertError::NotFoundError { .. } => "Convert a CSV file first",
            ConvertError::ConfigError { .. } | ConvertError::InvalidConfigValueError { .. } => {
                "Fix the command line flags or the TOML configuration file"
            }
            ConvertError::IoError(_) => "Check that the output directory exists and is writable",
            ConvertError::SerializationError(_) => "Report this as a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("The CSV input was rejected: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Storage => format!("Could not access stored data: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
