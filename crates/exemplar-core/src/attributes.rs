use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use crate::value::Value;

/// Normalized attribute name.
///
/// Surrounding whitespace and a single leading `:` are stripped, so the
/// string form `"login"` and the symbol form `":login"` name the same
/// attribute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeName(String);

impl AttributeName {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        let name = trimmed.strip_prefix(':').unwrap_or(trimmed).trim();
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttributeName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AttributeName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&String> for AttributeName {
    fn from(value: &String) -> Self {
        Self::new(value)
    }
}

impl From<&AttributeName> for AttributeName {
    fn from(value: &AttributeName) -> Self {
        value.clone()
    }
}

/// Attribute name to value mapping used for overrides and construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(BTreeMap<AttributeName, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<AttributeName>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(
        &mut self,
        name: impl Into<AttributeName>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: impl Into<AttributeName>) -> Option<&Value> {
        let name: AttributeName = name.into();
        self.0.get(&name)
    }

    pub fn contains(&self, name: impl Into<AttributeName>) -> bool {
        let name: AttributeName = name.into();
        self.0.contains_key(&name)
    }

    pub fn remove(&mut self, name: impl Into<AttributeName>) -> Option<Value> {
        let name: AttributeName = name.into();
        self.0.remove(&name)
    }

    /// Merge `other` into this map; values from `other` win.
    pub fn merge(&mut self, other: Attributes) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &AttributeName> {
        self.0.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, AttributeName, Value> {
        self.0.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<AttributeName>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Attributes {
    type Item = (AttributeName, Value);
    type IntoIter = btree_map::IntoIter<AttributeName, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a AttributeName, &'a Value);
    type IntoIter = btree_map::Iter<'a, AttributeName, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_and_string_forms_collide() {
        assert_eq!(AttributeName::from(":login"), AttributeName::from("login"));
        assert_eq!(AttributeName::from("  login "), AttributeName::from("login"));
    }

    #[test]
    fn later_merge_wins() {
        let mut base = Attributes::new().with("name", "generated").with("age", 3);
        base.merge(Attributes::new().with(":name", "override"));
        assert_eq!(base.get("name"), Some(&Value::from("override")));
        assert_eq!(base.get("age"), Some(&Value::Int(3)));
    }
}
