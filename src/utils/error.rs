use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("API request failed for {context}: {message}")]
    ApiError { context: String, message: String },

    #[error("HTTP transport error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },

    #[error("Failed to write '{path}': {message}")]
    WriteError { path: String, message: String },

    #[error("Model document error: {message}")]
    ModelError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn api(context: impl Into<String>, message: impl Into<String>) -> Self {
        SiteError::ApiError {
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::ApiError { .. } | SiteError::HttpError(_) => ErrorCategory::Network,
            SiteError::IoError(_) | SiteError::WriteError { .. } => ErrorCategory::Storage,
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SiteError::ModelError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // vendor hiccups are usually transient
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SiteError::ApiError { .. } | SiteError::HttpError(_) => {
                "Check the API key, the base URL and the vendor's rate limits, then retry"
            }
            SiteError::IoError(_) | SiteError::WriteError { .. } => {
                "Check that the output directory exists and is writable"
            }
            SiteError::ConfigError { .. } => {
                "Make sure the config file exists, is readable and is valid TOML"
            }
            SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. } => {
                "Fix the configuration file and run again"
            }
            SiteError::ModelError { .. } => {
                "Check that the fixture document is valid JSON with every required field"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the fixture provider: {}", self),
            ErrorCategory::Storage => format!("Could not persist output: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Data => format!("Input data problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
