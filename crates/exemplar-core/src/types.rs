use std::any::TypeId;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::value::Value;

/// Zero-argument, type-level method producing a value.
pub type ClassMethodFn = fn() -> Value;

/// Stable identifier of a target type.
///
/// Identity is the Rust `TypeId`; the name is carried for diagnostics only,
/// so two types sharing a name never compare equal.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name, without generic arguments.
    pub fn simple_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Descriptor of a target type: identity, ancestry, class methods and an
/// optional exemplar directory.
///
/// Ancestry is explicit: the descriptor owns its parent's descriptor, which
/// owns its own parent, up to the root.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    key: TypeKey,
    simple_name: String,
    parent: Option<Box<TypeInfo>>,
    class_methods: BTreeMap<String, ClassMethodFn>,
    exemplar_dir: Option<PathBuf>,
}

impl TypeInfo {
    pub fn of<T: 'static>() -> Self {
        let key = TypeKey::of::<T>();
        Self {
            key,
            simple_name: key.simple_name().to_string(),
            parent: None,
            class_methods: BTreeMap::new(),
            exemplar_dir: None,
        }
    }

    /// Override the simple name used to derive the exemplar file name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.simple_name = name.into();
        self
    }

    /// Declare `parent` as the immediate ancestor.
    ///
    /// The parent's own ancestors follow it in the chain, and its class
    /// methods are inherited unless this type already declares one with the
    /// same name.
    pub fn extends(mut self, parent: &TypeInfo) -> Self {
        self.parent = Some(Box::new(parent.clone()));
        for (name, method) in &parent.class_methods {
            self.class_methods.entry(name.clone()).or_insert(*method);
        }
        if self.exemplar_dir.is_none() {
            self.exemplar_dir = parent.exemplar_dir.clone();
        }
        self
    }

    pub fn class_method(mut self, name: impl Into<String>, method: ClassMethodFn) -> Self {
        self.class_methods.insert(name.into(), method);
        self
    }

    pub fn exemplar_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.exemplar_dir = Some(dir.into());
        self
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn parent(&self) -> Option<&TypeInfo> {
        self.parent.as_deref()
    }

    /// Ancestor descriptors from the immediate parent to the root.
    pub fn ancestry(&self) -> impl Iterator<Item = &TypeInfo> + '_ {
        std::iter::successors(self.parent(), |info| info.parent())
    }

    /// Ancestor keys from the immediate parent to the root.
    pub fn ancestors(&self) -> Vec<TypeKey> {
        self.ancestry().map(TypeInfo::key).collect()
    }

    /// This type followed by its ancestors.
    pub fn lineage(&self) -> impl Iterator<Item = TypeKey> + '_ {
        std::iter::successors(Some(self), |info| info.parent()).map(TypeInfo::key)
    }

    pub fn method(&self, name: &str) -> Option<ClassMethodFn> {
        self.class_methods.get(name).copied()
    }

    pub fn responds_to(&self, name: &str) -> bool {
        self.class_methods.contains_key(name)
    }

    pub fn exemplar_dir_override(&self) -> Option<&Path> {
        self.exemplar_dir.as_deref()
    }
}
