//! Exemplar file contracts.
//!
//! An exemplar file declares the attribute generators of one type as a TOML
//! array of `[[generator]]` tables. This crate parses those files and emits
//! the JSON Schema of the format.

pub mod errors;
pub mod model;
pub mod parse;
pub mod schema;

pub use errors::{ExemplarFileError, Result};
pub use model::{ExemplarFile, GeneratorDecl, LiteralValue};
pub use parse::{parse_exemplar, read_exemplar};
pub use schema::{exemplar_json_schema, exemplar_json_schema_pretty};
