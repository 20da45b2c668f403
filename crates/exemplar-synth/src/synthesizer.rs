use exemplar_core::{
    AttributeName, Attributes, Model, Persist, TypeInfo, TypeKey, Value, validate_type_info,
};
use tracing::{debug, warn};

use crate::associations::{Association, AssociationResolver, NoAssociations};
use crate::errors::{Result, SynthesisError};
use crate::generators::GeneratorOptions;
use crate::loader::ExemplarLoader;
use crate::model::SynthesisOptions;
use crate::registry::GeneratorRegistry;

/// Produces instances of target types from registered generators,
/// overrides and required associations.
pub struct ObjectSynthesizer {
    options: SynthesisOptions,
    registry: GeneratorRegistry,
    loader: ExemplarLoader,
    associations: Box<dyn AssociationResolver>,
    in_flight: Vec<TypeKey>,
}

impl ObjectSynthesizer {
    pub fn new(options: SynthesisOptions) -> Self {
        Self {
            registry: GeneratorRegistry::new(options.seed),
            loader: ExemplarLoader::new(&options),
            associations: Box::new(NoAssociations),
            in_flight: Vec::new(),
            options,
        }
    }

    pub fn with_associations(mut self, resolver: impl AssociationResolver + 'static) -> Self {
        self.associations = Box::new(resolver);
        self
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut GeneratorRegistry {
        &mut self.registry
    }

    pub fn loader(&self) -> &ExemplarLoader {
        &self.loader
    }

    /// Register a generator on `T`'s own table.
    pub fn register<T: Model>(
        &mut self,
        attribute: impl Into<AttributeName>,
        options: GeneratorOptions,
    ) -> Result<()> {
        self.registry.register(attribute, options, &T::type_info())
    }

    /// Register a single `attribute => value` literal on `T`.
    pub fn register_mapping<T, K, V>(
        &mut self,
        mapping: impl IntoIterator<Item = (K, V)>,
    ) -> Result<()>
    where
        T: Model,
        K: Into<AttributeName>,
        V: Into<Value>,
    {
        self.registry.register_mapping(mapping, &T::type_info())
    }

    /// Load `T`'s exemplar file if that has not been attempted yet.
    pub fn ensure_loaded<T: Model>(&mut self) -> Result<()> {
        self.ensure_loaded_info(&T::type_info())
    }

    /// Build an unpersisted instance of `T`.
    pub fn spawn<T: Model>(&mut self, overrides: Attributes) -> Result<T> {
        let attributes = self.attributes_for::<T>(overrides)?;
        let record = T::from_attributes(attributes);
        debug!(type_name = %T::type_info().simple_name(), "record spawned");
        Ok(record)
    }

    /// Spawn and attempt to persist. A failed save is logged and the
    /// unsaved instance is returned.
    pub fn generate<T: Persist>(&mut self, overrides: Attributes) -> Result<T> {
        let mut record = self.spawn::<T>(overrides)?;
        if !record.save() {
            warn!(
                type_name = %T::type_info().simple_name(),
                valid = record.is_valid(),
                errors = ?record.errors(),
                "save failed, returning unsaved record"
            );
        }
        Ok(record)
    }

    /// Spawn and persist, failing with `Validation` when the save fails.
    pub fn generate_strict<T: Persist>(&mut self, overrides: Attributes) -> Result<T> {
        let mut record = self.spawn::<T>(overrides)?;
        if !record.save() {
            return Err(SynthesisError::Validation {
                type_name: T::type_info().simple_name().to_string(),
                messages: record.errors(),
            });
        }
        Ok(record)
    }

    /// Merged attribute map `spawn` would construct `T` from.
    ///
    /// Required associations missing from `overrides` are generated first,
    /// then every visible generator whose attribute is still unset runs
    /// once; overrides are merged last and never trigger a generator.
    pub fn attributes_for<T: Model>(&mut self, overrides: Attributes) -> Result<Attributes> {
        let info = T::type_info();
        validate_type_info(&info)?;
        self.ensure_loaded_info(&info)?;

        let mut attributes = Attributes::new();
        self.fill_required_associations(&info, &overrides, &mut attributes)?;

        for attribute in self.registry.generated_attributes(&info) {
            if overrides.contains(&attribute) || attributes.contains(&attribute) {
                continue;
            }
            if let Some(value) = self.registry.generate(&attribute, &info) {
                attributes.insert(attribute, value);
            }
        }

        attributes.merge(overrides);
        Ok(attributes)
    }

    fn ensure_loaded_info(&mut self, info: &TypeInfo) -> Result<()> {
        if self.options.load_ancestor_exemplars {
            let ancestry: Vec<&TypeInfo> = info.ancestry().collect();
            for ancestor in ancestry.into_iter().rev() {
                self.loader.ensure_loaded(ancestor, &mut self.registry)?;
            }
        }
        self.loader.ensure_loaded(info, &mut self.registry)?;
        Ok(())
    }

    fn fill_required_associations(
        &mut self,
        info: &TypeInfo,
        overrides: &Attributes,
        attributes: &mut Attributes,
    ) -> Result<()> {
        let required = self.associations.required_associations(info);
        if required.is_empty() {
            return Ok(());
        }

        if self.in_flight.contains(&info.key()) {
            let mut path: Vec<String> = self
                .in_flight
                .iter()
                .map(|key| key.simple_name().to_string())
                .collect();
            path.push(info.key().simple_name().to_string());
            return Err(SynthesisError::AssociationCycle { path });
        }

        self.in_flight.push(info.key());
        let result = self.generate_associations(info, required, overrides, attributes);
        self.in_flight.pop();
        result
    }

    fn generate_associations(
        &mut self,
        info: &TypeInfo,
        required: Vec<Association>,
        overrides: &Attributes,
        attributes: &mut Attributes,
    ) -> Result<()> {
        for association in required {
            if overrides.contains(&association.name) || overrides.contains(&association.foreign_key)
            {
                continue;
            }
            debug!(
                type_name = info.simple_name(),
                association = %association.name,
                target = association.target.type_info().simple_name(),
                "generating required association"
            );
            let value = association.target.generate(self)?;
            attributes.insert(association.name, value);
        }
        Ok(())
    }
}

impl Default for ObjectSynthesizer {
    fn default() -> Self {
        Self::new(SynthesisOptions::default())
    }
}
