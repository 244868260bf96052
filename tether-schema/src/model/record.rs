//! Records and their expanded relations.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::Collection;

/// Keys reserved for record metadata in the serialized form.
const RESERVED_KEYS: &[&str] = &["id", "collectionId", "collectionName", "expand"];

/// Related record(s) attached to a record under a relation field name.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpandValue {
    /// A single related record.
    One(Arc<Record>),
    /// An ordered list of related records.
    Many(Vec<Arc<Record>>),
}

impl ExpandValue {
    /// Get the single record, if this is a single-valued expansion.
    pub fn as_one(&self) -> Option<&Record> {
        match self {
            Self::One(record) => Some(record),
            Self::Many(_) => None,
        }
    }

    /// Get the record list, if this is a multi-valued expansion.
    pub fn as_many(&self) -> Option<&[Arc<Record>]> {
        match self {
            Self::One(_) => None,
            Self::Many(records) => Some(records),
        }
    }

    /// Iterate over every attached record.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        let slice: &[Arc<Record>] = match self {
            Self::One(record) => std::slice::from_ref(record),
            Self::Many(records) => records,
        };
        slice.iter().map(Arc::as_ref)
    }

    /// Ids of the attached records, in order.
    pub fn ids(&self) -> Vec<&str> {
        self.records().map(Record::id).collect()
    }
}

impl Serialize for ExpandValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::One(record) => record.as_ref().serialize(serializer),
            Self::Many(records) => serializer.collect_seq(records.iter().map(Arc::as_ref)),
        }
    }
}

/// Expand data of a record, keyed by relation field name.
pub type ExpandMap = IndexMap<String, ExpandValue>;

/// A single row of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: String,
    collection: Arc<Collection>,
    data: IndexMap<String, Value>,
    expand: ExpandMap,
}

impl Record {
    /// Create an empty record of a collection.
    pub fn new(collection: Arc<Collection>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            collection,
            data: IndexMap::new(),
            expand: IndexMap::new(),
        }
    }

    /// Set a field value (builder style).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Get the record id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the owning collection.
    #[inline]
    pub fn collection(&self) -> &Arc<Collection> {
        &self.collection
    }

    /// Get the raw value of a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Set the raw value of a field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(field.into(), value.into());
    }

    /// Get all raw field values.
    pub fn data(&self) -> &IndexMap<String, Value> {
        &self.data
    }

    /// Read a field as an ordered list of strings.
    ///
    /// Missing and `null` values yield an empty list. A plain string yields
    /// itself, unless it holds a JSON array, which is decoded. Array items
    /// that are strings or numbers are kept in order; empty strings are
    /// skipped.
    pub fn string_list(&self, field: &str) -> Vec<String> {
        match self.data.get(field) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(s)) => string_to_list(s),
            Some(Value::Array(items)) => items.iter().filter_map(value_to_id).collect(),
            Some(other) => value_to_id(other).into_iter().collect(),
        }
    }

    /// Get the expand data.
    pub fn expand(&self) -> &ExpandMap {
        &self.expand
    }

    /// Get mutable access to the expand data.
    pub fn expand_mut(&mut self) -> &mut ExpandMap {
        &mut self.expand
    }

    /// Replace the expand data.
    pub fn set_expand(&mut self, expand: ExpandMap) {
        self.expand = expand;
    }

    /// Get the expanded value of a single relation field.
    pub fn get_expand(&self, field: &str) -> Option<&ExpandValue> {
        self.expand.get(field)
    }
}

fn string_to_list(s: &str) -> Vec<String> {
    let trimmed = s.trim();
    if trimmed.starts_with('[') {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
            return items.iter().filter_map(value_to_id).collect();
        }
    }
    if s.is_empty() {
        Vec::new()
    } else {
        vec![s.to_string()]
    }
}

fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("collectionId", &self.collection.id)?;
        map.serialize_entry("collectionName", &self.collection.name)?;
        for (key, value) in &self.data {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        if !self.expand.is_empty() {
            map.serialize_entry("expand", &self.expand)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn users() -> Arc<Collection> {
        Arc::new(Collection::new("c_users", "users"))
    }

    #[test]
    fn test_string_list_shapes() {
        let record = Record::new(users(), "u1")
            .with("none", Value::Null)
            .with("single", "a1")
            .with("empty", "")
            .with("encoded", r#"["a1","a2"]"#)
            .with("list", json!(["a1", "", "a2", 7, null, "a1"]))
            .with("flag", true);

        assert!(record.string_list("missing").is_empty());
        assert!(record.string_list("none").is_empty());
        assert!(record.string_list("empty").is_empty());
        assert!(record.string_list("flag").is_empty());
        assert_eq!(record.string_list("single"), vec!["a1"]);
        assert_eq!(record.string_list("encoded"), vec!["a1", "a2"]);
        assert_eq!(record.string_list("list"), vec!["a1", "a2", "7", "a1"]);
    }

    #[test]
    fn test_expand_accessors() {
        let collection = users();
        let a = Arc::new(Record::new(collection.clone(), "a"));
        let b = Arc::new(Record::new(collection.clone(), "b"));

        let mut record = Record::new(collection, "owner");
        record
            .expand_mut()
            .insert("many".into(), ExpandValue::Many(vec![a.clone(), b]));
        record.expand_mut().insert("one".into(), ExpandValue::One(a));

        assert_eq!(record.get_expand("many").unwrap().ids(), vec!["a", "b"]);
        assert_eq!(record.get_expand("one").unwrap().as_one().unwrap().id(), "a");
        assert!(record.get_expand("one").unwrap().as_many().is_none());

        record.set_expand(ExpandMap::new());
        assert!(record.expand().is_empty());
    }

    #[test]
    fn test_serialize_with_expand() {
        let collection = users();
        let friend = Record::new(collection.clone(), "u2").with("name", "Bob");
        let mut record = Record::new(collection, "u1")
            .with("name", "Alice")
            .with("id", "shadowed");
        record
            .expand_mut()
            .insert("friend".into(), ExpandValue::One(Arc::new(friend)));

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "id": "u1",
                "collectionId": "c_users",
                "collectionName": "users",
                "name": "Alice",
                "expand": {
                    "friend": {
                        "id": "u2",
                        "collectionId": "c_users",
                        "collectionName": "users",
                        "name": "Bob"
                    }
                }
            })
        );
    }
}
