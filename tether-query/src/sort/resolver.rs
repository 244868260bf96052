//! Field resolvers used when rendering sort fields.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use tether_schema::Collection;

use crate::error::{QueryError, QueryResult};

/// A field name resolved to a backend identifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedField {
    /// Backend-specific identifier or expression.
    pub identifier: String,
    /// Parameters the expression binds, if any.
    pub params: IndexMap<String, Value>,
}

impl ResolvedField {
    /// Create a resolved field without parameters.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            params: IndexMap::new(),
        }
    }

    /// Bind a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Maps user-facing field names to backend identifiers.
pub trait FieldResolver {
    /// Resolve a field name.
    fn resolve(&self, field: &str) -> QueryResult<ResolvedField>;
}

impl<F> FieldResolver for F
where
    F: Fn(&str) -> QueryResult<ResolvedField>,
{
    fn resolve(&self, field: &str) -> QueryResult<ResolvedField> {
        self(field)
    }
}

/// Resolver accepting a fixed set of field names.
///
/// Names resolve to themselves unless a column mapping is registered.
#[derive(Debug, Clone, Default)]
pub struct SimpleFieldResolver {
    allowed: IndexSet<String>,
    columns: IndexMap<String, String>,
}

impl SimpleFieldResolver {
    /// Create a resolver for the given field names.
    pub fn new(allowed: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            columns: IndexMap::new(),
        }
    }

    /// Create a resolver accepting `id` and every schema field of a collection.
    pub fn for_collection(collection: &Collection) -> Self {
        Self::new(std::iter::once("id").chain(collection.field_names()))
    }

    /// Map a field name to a different column identifier.
    pub fn map(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        let field = field.into();
        self.allowed.insert(field.clone());
        self.columns.insert(field, column.into());
        self
    }
}

impl FieldResolver for SimpleFieldResolver {
    fn resolve(&self, field: &str) -> QueryResult<ResolvedField> {
        if !self.allowed.contains(field) {
            return Err(QueryError::invalid_sort(field).with_help(format!(
                "allowed fields: {}",
                self.allowed.iter().cloned().collect::<Vec<_>>().join(", ")
            )));
        }
        let identifier = self
            .columns
            .get(field)
            .map(String::as_str)
            .unwrap_or(field);
        Ok(ResolvedField::new(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_schema::Field;

    #[test]
    fn test_simple_resolver() {
        let resolver = SimpleFieldResolver::new(["name", "created"]).map("age", "users.age");

        assert_eq!(resolver.resolve("name").unwrap().identifier, "name");
        assert_eq!(resolver.resolve("age").unwrap().identifier, "users.age");
        assert!(resolver.resolve("password").is_err());
    }

    #[test]
    fn test_collection_resolver() {
        let collection = Collection::new("c_users", "users")
            .with_field(Field::text("name"))
            .with_field(Field::date("created"));
        let resolver = SimpleFieldResolver::for_collection(&collection);

        assert!(resolver.resolve("id").is_ok());
        assert!(resolver.resolve("created").is_ok());
        assert!(resolver.resolve("email").is_err());
    }
}
