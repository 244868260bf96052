//! In-memory record store.
//!
//! `MemoryStore` keeps collections and their records behind read-write locks
//! and serves as both the collection lookup and the relation fetcher of an
//! expansion. It is meant for tests, fixtures and small embedded data sets.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use tether_schema::{Collection, CollectionLookup, CollectionRegistry, Record};

use crate::error::{QueryError, QueryResult};
use crate::expand::RelationFetcher;

/// Thread-safe in-memory collections and records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    registry: RwLock<CollectionRegistry>,
    /// Records keyed by collection id, then record id.
    records: RwLock<HashMap<String, IndexMap<String, Record>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection.
    pub fn register(&self, collection: Collection) -> QueryResult<Arc<Collection>> {
        let collection = self.registry.write().register(collection)?;
        self.records
            .write()
            .insert(collection.id.clone(), IndexMap::new());
        Ok(collection)
    }

    /// Insert or replace a record.
    ///
    /// The record's collection must be registered in this store.
    pub fn insert(&self, record: Record) -> QueryResult<()> {
        let collection_id = record.collection().id.clone();
        let mut records = self.records.write();
        let rows = records
            .get_mut(&collection_id)
            .ok_or_else(|| QueryError::collection_not_found(&collection_id))?;
        rows.insert(record.id().to_string(), record);
        Ok(())
    }

    /// Insert several records.
    pub fn insert_many(&self, records: impl IntoIterator<Item = Record>) -> QueryResult<()> {
        records.into_iter().try_for_each(|record| self.insert(record))
    }

    /// Get a copy of a record by collection (id or name) and record id.
    pub fn get(&self, collection: &str, id: &str) -> Option<Record> {
        let collection = self.find_collection(collection)?;
        self.records
            .read()
            .get(&collection.id)
            .and_then(|rows| rows.get(id))
            .cloned()
    }

    /// Remove a record, returning it if present.
    pub fn remove(&self, collection: &str, id: &str) -> Option<Record> {
        let collection = self.find_collection(collection)?;
        self.records
            .write()
            .get_mut(&collection.id)
            .and_then(|rows| rows.shift_remove(id))
    }

    /// Number of records stored for a collection.
    pub fn count(&self, collection: &str) -> usize {
        let Some(collection) = self.find_collection(collection) else {
            return 0;
        };
        self.records
            .read()
            .get(&collection.id)
            .map_or(0, IndexMap::len)
    }

    /// Check that every relation field points to a registered collection.
    pub fn validate(&self) -> QueryResult<()> {
        Ok(self.registry.read().validate_relations()?)
    }
}

impl CollectionLookup for MemoryStore {
    fn find_collection(&self, name_or_id: &str) -> Option<Arc<Collection>> {
        self.registry.read().find_collection(name_or_id)
    }
}

impl RelationFetcher for MemoryStore {
    /// Returns stored records for the distinct requested ids, in request
    /// order; unknown ids are skipped.
    fn fetch(&self, collection: &Arc<Collection>, ids: &[String]) -> QueryResult<Vec<Record>> {
        let records = self.records.read();
        let Some(rows) = records.get(&collection.id) else {
            return Err(QueryError::collection_not_found(&collection.id));
        };

        let unique: IndexSet<&String> = ids.iter().collect();
        Ok(unique
            .into_iter()
            .filter_map(|id| rows.get(id.as_str()).cloned())
            .collect())
    }
}
