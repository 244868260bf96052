//! Field definitions for collection schemas.

use serde::{Deserialize, Serialize};

/// Options carried by a relation field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationOptions {
    /// Id of the collection the relation points to.
    pub collection_id: String,
    /// Maximum number of related records (`Some(1)` marks a single relation).
    #[serde(default)]
    pub max_select: Option<usize>,
    /// Whether related records are removed together with the owner.
    #[serde(default)]
    pub cascade_delete: bool,
}

impl RelationOptions {
    /// Create relation options targeting the given collection.
    pub fn new(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            max_select: None,
            cascade_delete: false,
        }
    }

    /// Mark the relation as single-valued.
    pub fn single(self) -> Self {
        self.max_select(1)
    }

    /// Set the maximum number of related records.
    pub fn max_select(mut self, max: usize) -> Self {
        self.max_select = Some(max);
        self
    }

    /// Enable cascading deletes.
    pub fn cascade_delete(mut self) -> Self {
        self.cascade_delete = true;
        self
    }

    /// Check if the relation holds at most one record.
    #[inline]
    pub fn is_single(&self) -> bool {
        self.max_select == Some(1)
    }
}

/// The kind of a field, with kind-specific options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "lowercase")]
pub enum FieldKind {
    /// Plain text.
    Text,
    /// Integer or floating point number.
    Number,
    /// Boolean flag.
    Bool,
    /// Date/time stored as text.
    Date,
    /// Arbitrary JSON.
    Json,
    /// Reference to one or more records of another collection.
    Relation(RelationOptions),
}

impl FieldKind {
    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Json => "json",
            Self::Relation(_) => "relation",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named field in a collection schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field kind and options.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Whether a value is required.
    #[serde(default)]
    pub required: bool,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }

    /// Create a text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Create a number field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// Create a boolean field.
    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    /// Create a date field.
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    /// Create a JSON field.
    pub fn json(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Json)
    }

    /// Create a relation field.
    pub fn relation(name: impl Into<String>, options: RelationOptions) -> Self {
        Self::new(name, FieldKind::Relation(options))
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Get the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the relation options if this is a relation field.
    #[inline]
    pub fn as_relation(&self) -> Option<&RelationOptions> {
        match &self.kind {
            FieldKind::Relation(options) => Some(options),
            _ => None,
        }
    }

    /// Check if this is a relation field.
    pub fn is_relation(&self) -> bool {
        self.as_relation().is_some()
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.kind)?;
        if let Some(options) = self.as_relation() {
            write!(f, "({}", options.collection_id)?;
            if !options.is_single() {
                write!(f, "[]")?;
            }
            write!(f, ")")?;
        }
        if self.required {
            write!(f, " required")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_as_relation() {
        let field = Field::relation("author", RelationOptions::new("users").single());
        let options = field.as_relation().unwrap();
        assert_eq!(options.collection_id, "users");
        assert!(options.is_single());

        assert!(Field::text("title").as_relation().is_none());
        assert!(!Field::json("meta").is_relation());
    }

    #[test]
    fn test_multiplicity() {
        assert!(!RelationOptions::new("tags").is_single());
        assert!(!RelationOptions::new("tags").max_select(5).is_single());
        assert!(RelationOptions::new("tags").max_select(1).is_single());
    }

    #[test]
    fn test_display() {
        let field = Field::relation("tags", RelationOptions::new("tags")).required();
        assert_eq!(field.to_string(), "tags relation(tags[]) required");
        assert_eq!(Field::number("views").to_string(), "views number");
    }

    #[test]
    fn test_serde_shape() {
        let field = Field::relation("author", RelationOptions::new("users").single());
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "author",
                "type": "relation",
                "options": {
                    "collectionId": "users",
                    "maxSelect": 1,
                    "cascadeDelete": false
                },
                "required": false
            })
        );

        let back: Field = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);

        let text: Field = serde_json::from_str(r#"{"name":"title","type":"text"}"#).unwrap();
        assert_eq!(text, Field::text("title"));
    }
}
