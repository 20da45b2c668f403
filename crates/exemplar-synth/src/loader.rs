use std::collections::HashSet;
use std::path::{Path, PathBuf};

use exemplar_core::{TypeInfo, TypeKey};
use exemplar_file::{ExemplarFileError, GeneratorDecl, read_exemplar};
use heck::ToSnakeCase;
use tracing::{debug, info};

use crate::errors::{Result, SynthesisError};
use crate::generators::GeneratorOptions;
use crate::model::SynthesisOptions;
use crate::registry::GeneratorRegistry;

/// One-shot, per-type loading of exemplar files into the registry.
///
/// Each exact type gets a single attempt; the flag is not inherited and
/// ancestors are not visited here.
#[derive(Debug, Clone)]
pub struct ExemplarLoader {
    base_dir: PathBuf,
    suffix: String,
    loaded: HashSet<TypeKey>,
}

impl ExemplarLoader {
    pub fn new(options: &SynthesisOptions) -> Self {
        Self {
            base_dir: options.exemplar_dir.clone(),
            suffix: options.exemplar_suffix.clone(),
            loaded: HashSet::new(),
        }
    }

    /// `<dir>/<snake_case name><suffix>`, where `dir` is the type's own
    /// exemplar directory when it has one.
    pub fn exemplar_path(&self, ty: &TypeInfo) -> PathBuf {
        let dir = ty.exemplar_dir_override().unwrap_or(self.base_dir.as_path());
        dir.join(format!("{}{}", ty.simple_name().to_snake_case(), self.suffix))
    }

    pub fn is_loaded(&self, key: TypeKey) -> bool {
        self.loaded.contains(&key)
    }

    /// Load `ty`'s exemplar file unless an attempt was already made.
    ///
    /// Returns whether a file was evaluated. A missing file is not an error.
    pub fn ensure_loaded(
        &mut self,
        ty: &TypeInfo,
        registry: &mut GeneratorRegistry,
    ) -> Result<bool> {
        if !self.loaded.insert(ty.key()) {
            return Ok(false);
        }

        let path = self.exemplar_path(ty);
        if !path.is_file() {
            debug!(type_name = ty.simple_name(), path = %path.display(), "no exemplar file");
            return Ok(false);
        }

        let file = read_exemplar(&path).map_err(|err| invalid_exemplar(&path, err))?;
        let declared = file.generators.len();
        for decl in file.generators {
            let (attribute, options) = registration_from(decl);
            registry.register(attribute, options, ty)?;
        }

        info!(
            type_name = ty.simple_name(),
            path = %path.display(),
            generators = declared,
            "exemplar loaded"
        );
        Ok(true)
    }
}

fn registration_from(decl: GeneratorDecl) -> (String, GeneratorOptions) {
    let mut options = GeneratorOptions::new();
    if let Some(block) = decl.block {
        options = options.with_named_block(block);
    }
    if let Some(class) = decl.class {
        options = options.with_named_class(class);
    }
    if let Some(method) = decl.method {
        options = options.with_method(method);
    }
    if let Some(value) = decl.value {
        options = options.with_value(value);
    }
    if let Some(start) = decl.start {
        options = options.with_start(start);
    }
    (decl.attribute, options)
}

fn invalid_exemplar(path: &Path, err: ExemplarFileError) -> SynthesisError {
    SynthesisError::InvalidExemplar {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BlogPost;

    #[test]
    fn file_name_is_snake_cased_with_suffix() {
        let options = SynthesisOptions::default().with_exemplar_dir("fixtures");
        let loader = ExemplarLoader::new(&options);
        let path = loader.exemplar_path(&TypeInfo::of::<BlogPost>());
        assert_eq!(path, PathBuf::from("fixtures/blog_post_exemplar.toml"));
    }

    #[test]
    fn type_directory_overrides_base() {
        let loader = ExemplarLoader::new(&SynthesisOptions::default());
        let info = TypeInfo::of::<BlogPost>().exemplar_dir("custom");
        assert_eq!(
            loader.exemplar_path(&info),
            PathBuf::from("custom/blog_post_exemplar.toml")
        );
    }
}
