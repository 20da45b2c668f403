use std::collections::{BTreeSet, HashMap};
use std::fmt;

use exemplar_core::{
    AttributeName, Attributes, Model, Persist, RecordSnapshot, TypeInfo, TypeKey, Value,
};

use crate::errors::Result;
use crate::synthesizer::ObjectSynthesizer;

type GenerateFn = fn(&mut ObjectSynthesizer) -> Result<Value>;

/// Associated type of a relationship, able to generate (and persist) one of
/// its instances through the synthesizer.
#[derive(Clone)]
pub struct AssociationTarget {
    info: TypeInfo,
    generate: GenerateFn,
}

impl AssociationTarget {
    pub fn of<T: Persist>() -> Self {
        Self {
            info: T::type_info(),
            generate: generate_record::<T>,
        }
    }

    pub fn type_info(&self) -> &TypeInfo {
        &self.info
    }

    pub(crate) fn generate(&self, synthesizer: &mut ObjectSynthesizer) -> Result<Value> {
        (self.generate)(synthesizer)
    }
}

impl fmt::Debug for AssociationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AssociationTarget")
            .field(&self.info.key())
            .finish()
    }
}

fn generate_record<T: Persist>(synthesizer: &mut ObjectSynthesizer) -> Result<Value> {
    let record = synthesizer.generate::<T>(Attributes::new())?;
    Ok(Value::from(RecordSnapshot::of(&record)))
}

/// A belongs-to relationship of a type.
#[derive(Debug, Clone)]
pub struct Association {
    pub name: AttributeName,
    pub foreign_key: AttributeName,
    pub target: AssociationTarget,
}

/// Validation metadata consumed by the synthesizer.
pub trait AssociationResolver: Send {
    /// Every belongs-to relationship declared for `ty`.
    fn associations(&self, ty: &TypeInfo) -> Vec<Association>;

    fn is_attribute_required(&self, ty: &TypeInfo, attribute: &AttributeName) -> bool;

    /// Relationships whose name or foreign key is required.
    fn required_associations(&self, ty: &TypeInfo) -> Vec<Association> {
        self.associations(ty)
            .into_iter()
            .filter(|association| {
                self.is_attribute_required(ty, &association.name)
                    || self.is_attribute_required(ty, &association.foreign_key)
            })
            .collect()
    }
}

/// Resolver for types without relationships.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAssociations;

impl AssociationResolver for NoAssociations {
    fn associations(&self, _ty: &TypeInfo) -> Vec<Association> {
        Vec::new()
    }

    fn is_attribute_required(&self, _ty: &TypeInfo, _attribute: &AttributeName) -> bool {
        false
    }
}

/// In-memory validation metadata.
///
/// Declarations made on an ancestor apply to its descendants; for
/// associations the nearest declaration of a name wins.
#[derive(Debug, Default, Clone)]
pub struct ValidationMetadata {
    belongs_to: HashMap<TypeKey, Vec<Association>>,
    required: HashMap<TypeKey, BTreeSet<AttributeName>>,
}

impl ValidationMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that `Owner` belongs to `Target` through `name`. The foreign
    /// key defaults to `<name>_id`.
    pub fn belongs_to<Owner: Model, Target: Persist>(
        mut self,
        name: impl Into<AttributeName>,
        foreign_key: Option<&str>,
    ) -> Self {
        let name = name.into();
        let foreign_key = foreign_key
            .map(AttributeName::from)
            .unwrap_or_else(|| AttributeName::from(format!("{name}_id")));
        self.belongs_to
            .entry(Owner::type_info().key())
            .or_default()
            .push(Association {
                name,
                foreign_key,
                target: AssociationTarget::of::<Target>(),
            });
        self
    }

    pub fn validates_presence_of<Owner: Model>(
        mut self,
        attribute: impl Into<AttributeName>,
    ) -> Self {
        self.required
            .entry(Owner::type_info().key())
            .or_default()
            .insert(attribute.into());
        self
    }
}

impl AssociationResolver for ValidationMetadata {
    fn associations(&self, ty: &TypeInfo) -> Vec<Association> {
        let mut seen = BTreeSet::new();
        let mut associations = Vec::new();
        for key in ty.lineage() {
            let Some(declared) = self.belongs_to.get(&key) else {
                continue;
            };
            for association in declared {
                if seen.insert(association.name.clone()) {
                    associations.push(association.clone());
                }
            }
        }
        associations
    }

    fn is_attribute_required(&self, ty: &TypeInfo, attribute: &AttributeName) -> bool {
        ty.lineage().any(|key| {
            self.required
                .get(&key)
                .is_some_and(|required| required.contains(attribute))
        })
    }
}
