use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Active "contains" constraints, column -> value.
///
/// Keys are unique and keep insertion order; re-inserting a column replaces
/// its value in place. Serialized as a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    entries: Vec<(String, String)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the constraint for `column`
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Removes the constraint, returning its value when it existed
    pub fn remove(&mut self, column: &str) -> Option<String> {
        let index = self.entries.iter().position(|(c, _)| c == column)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn to_json(&self) -> String {
        // A map of strings always serializes
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// JSON object handed to the gateway search RPC
    pub fn to_value(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|(c, v)| (c.clone(), serde_json::Value::String(v.clone())))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl Serialize for FilterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (column, value) in &self.entries {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

struct FilterSetVisitor;

impl<'de> Visitor<'de> for FilterSetVisitor {
    type Value = FilterSet;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of column names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut filters = FilterSet::default();
        while let Some((column, value)) = access.next_entry::<String, String>()? {
            filters.insert(column, value);
        }
        Ok(filters)
    }
}

impl<'de> Deserialize<'de> for FilterSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FilterSetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinsert_overwrites_in_place() {
        let mut filters = FilterSet::new();
        filters.insert("city", "Austin");
        filters.insert("title", "CTO");
        filters.insert("city", "Boston");

        let entries: Vec<_> = filters.iter().collect();
        assert_eq!(entries, vec![("city", "Boston"), ("title", "CTO")]);
    }

    #[test]
    fn remove_missing_column_is_noop() {
        let mut filters = FilterSet::new();
        filters.insert("city", "Austin");

        assert_eq!(filters.remove("title"), None);
        assert_eq!(filters.remove("city").as_deref(), Some("Austin"));
        assert!(filters.is_empty());
    }

    #[test]
    fn json_keeps_insertion_order() {
        let mut filters = FilterSet::new();
        filters.insert("zeta", "1");
        filters.insert("alpha", "2");

        assert_eq!(filters.to_json(), r#"{"zeta":"1","alpha":"2"}"#);
        let back = FilterSet::from_json(r#"{"zeta":"1","alpha":"2"}"#).unwrap();
        assert_eq!(back, filters);
    }

    #[test]
    fn rejects_non_string_values() {
        assert!(FilterSet::from_json(r#"{"age":42}"#).is_err());
        assert!(FilterSet::from_json("[]").is_err());
    }
}
