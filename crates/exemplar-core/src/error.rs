use thiserror::Error;

/// Core error type shared across exemplar crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A type descriptor violates ancestry or naming invariants.
    #[error("invalid type: {0}")]
    InvalidType(String),
}

/// Convenience alias for results returned by exemplar crates.
pub type Result<T> = std::result::Result<T, Error>;
