use std::collections::{BTreeMap, BTreeSet, HashMap};

use exemplar_core::{AttributeName, TypeInfo, TypeKey, Value, validate_type_info};
use tracing::debug;

use crate::errors::{Result, SynthesisError};
use crate::generators::{BlockCatalog, GeneratorEntry, GeneratorOptions, ProducerCatalog};
use crate::model::SynthesisOptions;

/// Per-type tables of attribute generators with ancestor-aware lookup.
///
/// A type's table is created on its first registration and is never shared
/// with another type. Lookup checks the starting type's own table first and
/// then each ancestor in order, so a subclass entry always shadows the
/// parent's entry for the same attribute.
pub struct GeneratorRegistry {
    tables: HashMap<TypeKey, BTreeMap<AttributeName, GeneratorEntry>>,
    blocks: BlockCatalog,
    producers: ProducerCatalog,
}

impl GeneratorRegistry {
    pub fn new(seed: u64) -> Self {
        Self::with_catalogs(BlockCatalog::new(), ProducerCatalog::new(seed))
    }

    pub fn with_catalogs(blocks: BlockCatalog, producers: ProducerCatalog) -> Self {
        Self {
            tables: HashMap::new(),
            blocks,
            producers,
        }
    }

    pub fn blocks_mut(&mut self) -> &mut BlockCatalog {
        &mut self.blocks
    }

    pub fn producers_mut(&mut self) -> &mut ProducerCatalog {
        &mut self.producers
    }

    /// Bind a generator for `attribute` on `owner`'s own table.
    pub fn register(
        &mut self,
        attribute: impl Into<AttributeName>,
        options: GeneratorOptions,
        owner: &TypeInfo,
    ) -> Result<()> {
        let attribute = attribute.into();
        if attribute.is_empty() {
            return Err(SynthesisError::InvalidGeneratorSpecification {
                attribute: attribute.to_string(),
                reason: "attribute name must not be empty".to_string(),
            });
        }
        validate_type_info(owner)?;

        if self.has_own(owner.key(), &attribute) {
            return Err(SynthesisError::DuplicateGenerator {
                attribute: attribute.to_string(),
                type_name: owner.simple_name().to_string(),
            });
        }

        let spec = options.resolve(&attribute, owner, &self.blocks, &self.producers)?;
        debug!(
            type_name = owner.simple_name(),
            attribute = %attribute,
            kind = spec.kind(),
            "generator registered"
        );
        let entry = GeneratorEntry::new(attribute.clone(), spec, owner.key());
        self.tables
            .entry(owner.key())
            .or_default()
            .insert(attribute, entry);
        Ok(())
    }

    /// Mapping form: a single `attribute => value` pair registered as a
    /// literal generator.
    pub fn register_mapping<K, V>(
        &mut self,
        mapping: impl IntoIterator<Item = (K, V)>,
        owner: &TypeInfo,
    ) -> Result<()>
    where
        K: Into<AttributeName>,
        V: Into<Value>,
    {
        let mut pairs = mapping.into_iter();
        let (Some((attribute, value)), None) = (pairs.next(), pairs.next()) else {
            return Err(SynthesisError::InvalidGeneratorSpecification {
                attribute: "<mapping>".to_string(),
                reason: "a mapping registration takes exactly one attribute => value pair"
                    .to_string(),
            });
        };
        self.register(attribute, GeneratorOptions::value(value), owner)
    }

    /// Whether `owner`'s own table binds `attribute`; ancestors are ignored.
    pub fn has_own(&self, owner: TypeKey, attribute: &AttributeName) -> bool {
        self.tables
            .get(&owner)
            .is_some_and(|table| table.contains_key(attribute))
    }

    /// First entry for `attribute` along `starting`'s lineage.
    pub fn lookup(
        &self,
        attribute: impl Into<AttributeName>,
        starting: &TypeInfo,
    ) -> Option<&GeneratorEntry> {
        let attribute = attribute.into();
        let owner = self.resolve_owner(&attribute, starting)?;
        self.tables.get(&owner)?.get(&attribute)
    }

    /// Invoke the generator found by `lookup`, if any.
    pub fn generate(
        &mut self,
        attribute: impl Into<AttributeName>,
        starting: &TypeInfo,
    ) -> Option<Value> {
        let attribute = attribute.into();
        let owner = self.resolve_owner(&attribute, starting)?;
        let entry = self.tables.get_mut(&owner)?.get_mut(&attribute)?;
        let value = entry.generate(starting);
        debug!(
            type_name = starting.simple_name(),
            attribute = %attribute,
            owner = %owner,
            "generator invoked"
        );
        Some(value)
    }

    /// Every attribute with a generator visible from `starting`, sorted.
    pub fn generated_attributes(&self, starting: &TypeInfo) -> Vec<AttributeName> {
        let mut attributes = BTreeSet::new();
        for key in starting.lineage() {
            if let Some(table) = self.tables.get(&key) {
                attributes.extend(table.keys().cloned());
            }
        }
        attributes.into_iter().collect()
    }

    fn resolve_owner(&self, attribute: &AttributeName, starting: &TypeInfo) -> Option<TypeKey> {
        starting.lineage().find(|key| self.has_own(*key, attribute))
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new(SynthesisOptions::default().seed)
    }
}
