use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by registration and synthesis.
///
/// Registration errors are raised eagerly by the registering call; only
/// `Validation` is tied to persistence and only the strict generate path
/// returns it.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("invalid generator specification for '{attribute}': {reason}")]
    InvalidGeneratorSpecification { attribute: String, reason: String },
    #[error("a generator for attribute '{attribute}' is already registered on {type_name}")]
    DuplicateGenerator { attribute: String, type_name: String },
    #[error("generator class '{class}' for attribute '{attribute}' cannot produce values")]
    UnresolvableGeneratorClass { attribute: String, class: String },
    #[error("{type_name} has no method '{method}' to generate attribute '{attribute}'")]
    UnresolvableGeneratorMethod {
        attribute: String,
        method: String,
        type_name: String,
    },
    #[error("generator block for '{attribute}' takes {arity} arguments, at most 1 is allowed")]
    BlockArity { attribute: String, arity: usize },
    #[error("validation failed for {type_name}: {}", messages.join(", "))]
    Validation {
        type_name: String,
        messages: Vec<String>,
    },
    #[error("invalid exemplar file {}: {message}", path.display())]
    InvalidExemplar { path: PathBuf, message: String },
    #[error("required associations form a cycle: {}", path.join(" -> "))]
    AssociationCycle { path: Vec<String> },
    #[error(transparent)]
    Core(#[from] exemplar_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

/// Convenience alias for synthesis results.
pub type Result<T> = std::result::Result<T, SynthesisError>;
