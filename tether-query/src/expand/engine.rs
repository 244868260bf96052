//! Recursive relation expansion.

use std::collections::HashMap;
use std::sync::Arc;

use tether_schema::{
    CollectionLookup, DEFAULT_MAX_EXPAND_DEPTH, DebugConfig, ExpandConfig, ExpandValue, Record,
};

use super::fetcher::RelationFetcher;
use super::path::{normalize_expands, split_head};
use crate::error::{QueryError, QueryResult};

/// Maximum number of relation hops resolved for one expand path.
pub const MAX_EXPAND_DEPTH: usize = DEFAULT_MAX_EXPAND_DEPTH;

/// Attaches related records to loaded records following expand paths.
///
/// All records passed to one call must belong to the same collection; the
/// schema is read from the first record. Each normalized path is expanded
/// independently and in order. An error aborts the call, leaving paths that
/// were already processed attached.
pub struct RecordExpander<'a> {
    collections: &'a dyn CollectionLookup,
    fetcher: Option<&'a dyn RelationFetcher>,
    max_depth: usize,
    log_expansions: bool,
}

impl<'a> RecordExpander<'a> {
    /// Create an expander resolving relation targets through `collections`.
    pub fn new(collections: &'a dyn CollectionLookup) -> Self {
        Self {
            collections,
            fetcher: None,
            max_depth: MAX_EXPAND_DEPTH,
            log_expansions: false,
        }
    }

    /// Set the relation fetcher.
    pub fn with_fetcher(mut self, fetcher: &'a dyn RelationFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Set the relation fetcher if present.
    pub fn with_optional_fetcher(mut self, fetcher: Option<&'a dyn RelationFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Set the maximum expand depth (values below 1 are treated as 1).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Enable a debug event for every expansion level.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log_expansions = enabled;
        self
    }

    /// Apply the depth limit from the expansion settings.
    ///
    /// `batch_size` and `dedup_ids` shape fetcher calls and only take effect
    /// through [`BatchedFetcher::from_config`](super::BatchedFetcher::from_config).
    pub fn with_config(self, config: &ExpandConfig) -> Self {
        self.with_max_depth(config.max_depth)
    }

    /// Apply debug settings; `TETHER_DEBUG` also enables expansion logging.
    pub fn with_debug(self, config: &DebugConfig) -> Self {
        self.with_logging(crate::logging::log_expansions(config))
    }

    /// Get the maximum expand depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Expand the relations of a single record.
    pub fn expand_one<S: AsRef<str>>(&self, record: &mut Record, expands: &[S]) -> QueryResult<()> {
        self.expand_many(std::slice::from_mut(record), expands)
    }

    /// Expand the relations of a batch of records from one collection.
    pub fn expand_many<S: AsRef<str>>(
        &self,
        records: &mut [Record],
        expands: &[S],
    ) -> QueryResult<()> {
        let fetcher = self.fetcher.ok_or_else(QueryError::missing_fetcher)?;

        for path in normalize_expands(expands) {
            crate::tether_debug!(path = %path, records = records.len(), "Expanding path");
            self.expand_path(fetcher, records, &path, 1)?;
        }

        Ok(())
    }

    fn expand_path(
        &self,
        fetcher: &dyn RelationFetcher,
        records: &mut [Record],
        path: &str,
        depth: usize,
    ) -> QueryResult<()> {
        if path.is_empty() || records.is_empty() {
            return Ok(());
        }
        if depth > self.max_depth {
            tracing::trace!(
                path = %path,
                depth,
                "Max expand depth reached, skipping remaining path"
            );
            return Ok(());
        }

        let (head, tail) = split_head(path);

        let collection = Arc::clone(records[0].collection());
        let field = collection
            .get_field(head)
            .ok_or_else(|| QueryError::field_not_found(head, &collection.name))?;
        let relation = field
            .as_relation()
            .ok_or_else(|| QueryError::not_a_relation(head, &collection.name))?;
        let target = self
            .collections
            .find_collection(&relation.collection_id)
            .ok_or_else(|| {
                QueryError::collection_not_found(&relation.collection_id)
                    .with_field(&field.name)
                    .with_context(format!("Expanding {}.{}", collection.name, field.name))
            })?;

        let ids: Vec<String> = records
            .iter()
            .flat_map(|record| record.string_list(&field.name))
            .collect();

        let mut related = fetcher.fetch(&target, &ids)?;

        if self.log_expansions {
            tracing::debug!(
                collection = %collection.name,
                field = %field.name,
                target = %target.name,
                requested = ids.len(),
                fetched = related.len(),
                depth,
                "Fetched relation records"
            );
        }

        if let Some(tail) = tail {
            self.expand_path(fetcher, &mut related, tail, depth + 1)?;
        }

        let indexed: HashMap<String, Arc<Record>> = related
            .into_iter()
            .map(|record| (record.id().to_string(), Arc::new(record)))
            .collect();

        let mut attached = 0usize;
        for record in records.iter_mut() {
            let mut matched: Vec<Arc<Record>> = record
                .string_list(&field.name)
                .iter()
                .filter_map(|id| indexed.get(id).cloned())
                .collect();

            if matched.is_empty() {
                continue;
            }

            let value = if relation.is_single() {
                ExpandValue::One(matched.swap_remove(0))
            } else {
                ExpandValue::Many(matched)
            };
            record.expand_mut().insert(field.name.clone(), value);
            attached += 1;
        }

        tracing::trace!(
            collection = %collection.name,
            field = %field.name,
            records = records.len(),
            attached,
            "Attached relation records"
        );

        Ok(())
    }
}

/// Expand the relations of a single record.
///
/// A `None` fetcher is reported as a configuration error before any record
/// is touched.
pub fn expand_record<S: AsRef<str>>(
    collections: &dyn CollectionLookup,
    record: &mut Record,
    expands: &[S],
    fetcher: Option<&dyn RelationFetcher>,
) -> QueryResult<()> {
    RecordExpander::new(collections)
        .with_optional_fetcher(fetcher)
        .expand_one(record, expands)
}

/// Expand the relations of a batch of records from one collection.
pub fn expand_records<S: AsRef<str>>(
    collections: &dyn CollectionLookup,
    records: &mut [Record],
    expands: &[S],
    fetcher: Option<&dyn RelationFetcher>,
) -> QueryResult<()> {
    RecordExpander::new(collections)
        .with_optional_fetcher(fetcher)
        .expand_many(records, expands)
}
