use crate::attributes::{AttributeName, Attributes};
use crate::types::TypeInfo;
use crate::value::Value;

/// Construction contract for a type whose instances can be synthesized.
pub trait Model: Sized + 'static {
    /// Descriptor with identity, ancestry and class methods.
    fn type_info() -> TypeInfo;

    /// Build a new, unpersisted instance. Attributes missing from the map
    /// fall back to the type's own defaults.
    fn from_attributes(attributes: Attributes) -> Self;

    /// Current attribute values.
    fn attributes(&self) -> Attributes;

    fn attribute(&self, name: impl Into<AttributeName>) -> Option<Value> {
        self.attributes().get(name).cloned()
    }
}

/// Persistence contract required by the persisting synthesis calls.
pub trait Persist: Model {
    /// Attempt to persist; returns whether the save succeeded.
    fn save(&mut self) -> bool;

    fn is_valid(&self) -> bool;

    /// Validation messages for the last failed save.
    fn errors(&self) -> Vec<String> {
        Vec::new()
    }
}
