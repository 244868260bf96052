//! Relation fetchers.

use std::sync::Arc;

use indexmap::IndexSet;
use tether_schema::{Collection, ExpandConfig, Record};

use crate::error::QueryResult;

/// Loads the records of a collection by id.
///
/// Implementations may return records in any order and may return fewer
/// records than requested; missing ids are not an error. The id list can be
/// empty and can contain repeated ids.
pub trait RelationFetcher {
    /// Fetch records of `collection` whose ids are in `ids`.
    fn fetch(&self, collection: &Arc<Collection>, ids: &[String]) -> QueryResult<Vec<Record>>;
}

impl<F> RelationFetcher for F
where
    F: Fn(&Arc<Collection>, &[String]) -> QueryResult<Vec<Record>>,
{
    fn fetch(&self, collection: &Arc<Collection>, ids: &[String]) -> QueryResult<Vec<Record>> {
        self(collection, ids)
    }
}

/// Fetcher wrapper that de-duplicates and chunks id lists.
///
/// Each chunk of at most `batch_size` ids is passed to the inner fetcher and
/// the results are concatenated. An empty id list short-circuits without
/// calling the inner fetcher.
#[derive(Debug, Clone)]
pub struct BatchedFetcher<F> {
    inner: F,
    batch_size: usize,
    dedup_ids: bool,
}

impl<F: RelationFetcher> BatchedFetcher<F> {
    /// Wrap a fetcher with the default batch size and no de-duplication.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            batch_size: tether_schema::DEFAULT_BATCH_SIZE,
            dedup_ids: false,
        }
    }

    /// Wrap a fetcher using the expansion settings.
    pub fn from_config(inner: F, config: &ExpandConfig) -> Self {
        Self::new(inner)
            .with_batch_size(config.batch_size)
            .with_dedup(config.dedup_ids)
    }

    /// Set the batch size (values below 1 are treated as 1).
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Enable or disable id de-duplication.
    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup_ids = dedup;
        self
    }

    /// Get the inner fetcher.
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: RelationFetcher> RelationFetcher for BatchedFetcher<F> {
    fn fetch(&self, collection: &Arc<Collection>, ids: &[String]) -> QueryResult<Vec<Record>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let unique: Vec<String>;
        let ids = if self.dedup_ids {
            unique = ids.iter().cloned().collect::<IndexSet<_>>().into_iter().collect();
            unique.as_slice()
        } else {
            ids
        };

        let mut records = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(self.batch_size) {
            tracing::trace!(
                collection = %collection.name,
                ids = chunk.len(),
                "Fetching relation batch"
            );
            records.extend(self.inner.fetch(collection, chunk)?);
        }
        Ok(records)
    }
}
