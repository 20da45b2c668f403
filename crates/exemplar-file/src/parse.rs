use std::path::Path;

use crate::errors::Result;
use crate::model::ExemplarFile;

/// Parse exemplar declarations from TOML text.
pub fn parse_exemplar(content: &str) -> Result<ExemplarFile> {
    Ok(toml::from_str(content)?)
}

/// Read and parse an exemplar file.
pub fn read_exemplar(path: &Path) -> Result<ExemplarFile> {
    let content = std::fs::read_to_string(path)?;
    parse_exemplar(&content)
}
