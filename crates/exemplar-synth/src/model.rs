use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Options for the synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    /// Directory searched for exemplar files when a type has no own directory.
    pub exemplar_dir: PathBuf,
    /// Suffix appended to the snake-cased type name to form the file name.
    pub exemplar_suffix: String,
    /// Also load each ancestor's exemplar (root first) before a type's own.
    pub load_ancestor_exemplars: bool,
    /// Seed for catalog producers that draw random values.
    pub seed: u64,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            exemplar_dir: PathBuf::from("tests/exemplars"),
            exemplar_suffix: "_exemplar.toml".to_string(),
            load_ancestor_exemplars: false,
            seed: 42,
        }
    }
}

impl SynthesisOptions {
    pub fn with_exemplar_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.exemplar_dir = dir.into();
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
