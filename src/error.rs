use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Network / protocol failures from a remote service call
    #[error("Network error: {0}")]
    Network(String),

    /// The call succeeded but the body could not be interpreted
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// A remote call exceeded its deadline
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// The call succeeded but returned no usable data
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// Location lookup is not available in this environment
    #[error("Location lookup unsupported")]
    LocationUnsupported,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The caller referenced a target outside the current collection
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}

/// Conversion from reqwest::Error
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else if err.is_decode() {
            AppError::Malformed(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Malformed(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
