use thiserror::Error;

/// Errors raised while reading an exemplar file.
#[derive(Debug, Error)]
pub enum ExemplarFileError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for exemplar file operations.
pub type Result<T> = std::result::Result<T, ExemplarFileError>;
