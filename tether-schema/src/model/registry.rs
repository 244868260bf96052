//! Collection registry and lookup.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use super::Collection;
use crate::error::{SchemaError, SchemaResult};

/// Resolves collections by id or name.
pub trait CollectionLookup {
    /// Find a collection by its id or, failing that, its name.
    fn find_collection(&self, name_or_id: &str) -> Option<Arc<Collection>>;
}

impl<T: CollectionLookup + ?Sized> CollectionLookup for &T {
    fn find_collection(&self, name_or_id: &str) -> Option<Arc<Collection>> {
        (**self).find_collection(name_or_id)
    }
}

impl<T: CollectionLookup + ?Sized> CollectionLookup for Arc<T> {
    fn find_collection(&self, name_or_id: &str) -> Option<Arc<Collection>> {
        (**self).find_collection(name_or_id)
    }
}

/// Registry of collections, indexed by id and name.
#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    collections: IndexMap<String, Arc<Collection>>,
    names: HashMap<String, String>,
}

impl CollectionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a collection.
    pub fn register(&mut self, collection: Collection) -> SchemaResult<Arc<Collection>> {
        collection.validate()?;

        if self.collections.contains_key(&collection.id) {
            return Err(SchemaError::duplicate("collection id", &collection.id));
        }
        if self.names.contains_key(&collection.name) {
            return Err(SchemaError::duplicate("collection", &collection.name));
        }

        let collection = Arc::new(collection);
        self.names
            .insert(collection.name.clone(), collection.id.clone());
        self.collections
            .insert(collection.id.clone(), Arc::clone(&collection));

        tracing::debug!(
            collection = %collection.name,
            id = %collection.id,
            fields = collection.fields.len(),
            "Registered collection"
        );

        Ok(collection)
    }

    /// Get a collection by id or name.
    pub fn get(&self, name_or_id: &str) -> Option<&Arc<Collection>> {
        self.collections.get(name_or_id).or_else(|| {
            self.names
                .get(name_or_id)
                .and_then(|id| self.collections.get(id))
        })
    }

    /// Check if a collection id or name is registered.
    pub fn contains(&self, name_or_id: &str) -> bool {
        self.get(name_or_id).is_some()
    }

    /// Iterate over all collections in registration order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<Collection>> {
        self.collections.values()
    }

    /// Get the number of registered collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Check that every relation field points to a registered collection.
    pub fn validate_relations(&self) -> SchemaResult<()> {
        let errors = self
            .collections
            .values()
            .flat_map(|collection| {
                collection.relation_fields().filter_map(move |field| {
                    let target = &field.as_relation()?.collection_id;
                    (!self.contains(target)).then(|| {
                        SchemaError::invalid_relation(
                            &collection.name,
                            &field.name,
                            format!("unknown target collection `{}`", target),
                        )
                    })
                })
            })
            .collect();

        SchemaError::collect(errors)
    }
}

impl CollectionLookup for CollectionRegistry {
    fn find_collection(&self, name_or_id: &str) -> Option<Arc<Collection>> {
        self.get(name_or_id).cloned()
    }
}
