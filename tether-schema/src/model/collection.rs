//! Collection definitions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::{SchemaError, SchemaResult};

/// A named group of records sharing one schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Stable collection id.
    pub id: String,
    /// Human readable, unique collection name.
    pub name: String,
    /// Ordered schema fields keyed by name.
    #[serde(with = "schema_fields")]
    pub fields: IndexMap<String, Field>,
}

impl Collection {
    /// Create a new collection without fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a field, replacing any existing field with the same name.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Add a field, rejecting duplicates.
    pub fn add_field(&mut self, field: Field) -> SchemaResult<()> {
        if self.fields.contains_key(&field.name) {
            return Err(SchemaError::duplicate(
                "field",
                format!("{}.{}", self.name, field.name),
            ));
        }
        self.fields.insert(field.name.clone(), field);
        Ok(())
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Iterate over all fields in schema order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Iterate over relation fields in schema order.
    pub fn relation_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values().filter(|f| f.is_relation())
    }

    /// Get all field names in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Validate the collection definition.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut errors = Vec::new();

        if self.id.trim().is_empty() {
            errors.push(SchemaError::invalid_collection(
                &self.name,
                "id must not be empty",
            ));
        }
        if self.name.trim().is_empty() {
            errors.push(SchemaError::invalid_collection(
                &self.id,
                "name must not be empty",
            ));
        }

        for (key, field) in &self.fields {
            if field.name.trim().is_empty() {
                errors.push(SchemaError::invalid_field(
                    &self.name,
                    key,
                    "name must not be empty",
                ));
            } else if field.name.contains('.') || field.name.chars().any(char::is_whitespace) {
                errors.push(SchemaError::invalid_field(
                    &self.name,
                    &field.name,
                    "name must not contain dots or whitespace",
                ));
            }

            if let Some(options) = field.as_relation() {
                if options.collection_id.trim().is_empty() {
                    errors.push(SchemaError::invalid_relation(
                        &self.name,
                        &field.name,
                        "target collection id must not be empty",
                    ));
                }
                if options.max_select == Some(0) {
                    errors.push(SchemaError::invalid_relation(
                        &self.name,
                        &field.name,
                        "max_select must be at least 1",
                    ));
                }
            }
        }

        SchemaError::collect(errors)
    }
}

/// Serialize the field map as an ordered list of fields.
mod schema_fields {
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::model::Field;

    pub fn serialize<S: Serializer>(
        fields: &IndexMap<String, Field>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(fields.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexMap<String, Field>, D::Error> {
        let list = Vec::<Field>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|f| (f.name.clone(), f)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationOptions;

    fn posts() -> Collection {
        Collection::new("c_posts", "posts")
            .with_field(Field::text("title").required())
            .with_field(Field::relation("author", RelationOptions::new("c_users").single()))
            .with_field(Field::relation("tags", RelationOptions::new("c_tags")))
    }

    #[test]
    fn test_field_lookup() {
        let collection = posts();
        assert!(collection.get_field("title").is_some());
        assert!(collection.get_field("missing").is_none());
        assert_eq!(
            collection.field_names().collect::<Vec<_>>(),
            vec!["title", "author", "tags"]
        );
        assert_eq!(collection.relation_fields().count(), 2);
    }

    #[test]
    fn test_add_field_rejects_duplicates() {
        let mut collection = posts();
        let err = collection.add_field(Field::number("title")).unwrap_err();
        assert!(matches!(err, SchemaError::Duplicate { .. }));
        assert!(collection.add_field(Field::number("views")).is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(posts().validate().is_ok());

        let broken = Collection::new("c_x", "x")
            .with_field(Field::text("a.b"))
            .with_field(Field::relation("rel", RelationOptions::new("")));
        let err = broken.validate().unwrap_err();
        assert!(matches!(err, SchemaError::ValidationFailed { count: 2, .. }));
    }

    #[test]
    fn test_serde_roundtrip_keeps_order() {
        let collection = posts();
        let json = serde_json::to_string(&collection).unwrap();
        let back: Collection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, collection);
        assert_eq!(
            back.field_names().collect::<Vec<_>>(),
            vec!["title", "author", "tags"]
        );
    }
}
