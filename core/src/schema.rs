use crate::value::ValueType;
use std::collections::HashMap;

/// Member-type registry for one filterable element type. The predicate
/// compiler resolves each member path against this once, at compile time.
pub trait Schema {
    /// The ValueType for a given member path, or None when the path is not
    /// a member of the element type.
    fn field_type(&self, path: &str) -> Option<ValueType>;
}

impl<S: Schema> Schema for &S {
    fn field_type(&self, path: &str) -> Option<ValueType> { (*self).field_type(path) }
}

/// Map-backed [`Schema`] for element types declared at runtime, e.g. by a
/// grid's column configuration.
#[derive(Debug, Clone, Default)]
pub struct MapSchema {
    fields: HashMap<String, ValueType>,
}

impl MapSchema {
    pub fn new() -> Self { Self::default() }

    pub fn with_field(mut self, path: impl Into<String>, ty: ValueType) -> Self {
        self.fields.insert(path.into(), ty);
        self
    }
}

impl Schema for MapSchema {
    fn field_type(&self, path: &str) -> Option<ValueType> { self.fields.get(path).copied() }
}

impl<K: Into<String>> FromIterator<(K, ValueType)> for MapSchema {
    fn from_iter<I: IntoIterator<Item = (K, ValueType)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

/// Optional mapping from a filter's logical key to the member path used in
/// a predicate (e.g. `claimedAt` -> `ClaimedDate.Value`). Supplied by the
/// data provider; the compiler only reads it.
#[derive(Debug, Clone, Default)]
pub struct KeyAliases {
    map: HashMap<String, String>,
}

impl KeyAliases {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, key: impl Into<String>, path: impl Into<String>) {
        self.map.insert(key.into(), path.into());
    }

    /// The member path for a key, falling back to the key itself when no
    /// alias is registered.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.map.get(key).map(String::as_str).unwrap_or(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyAliases {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { map: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_resolution_falls_back_to_key() {
        let aliases: KeyAliases = [("claimedAt", "ClaimedDate.Value")].into_iter().collect();
        assert_eq!(aliases.resolve("claimedAt"), "ClaimedDate.Value");
        assert_eq!(aliases.resolve("name"), "name");
    }

    #[test]
    fn test_map_schema_lookup() {
        let schema: MapSchema = [("name", ValueType::String), ("age", ValueType::I64)]
            .into_iter()
            .collect();
        assert_eq!(schema.field_type("age"), Some(ValueType::I64));
        assert_eq!(schema.field_type("missing"), None);
    }
}
