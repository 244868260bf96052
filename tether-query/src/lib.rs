//! # tether-query
//!
//! Relation expansion and sort rendering for Tether records.
//!
//! This crate provides:
//! - Expand path normalization (`a.b.c`, `a.b` collapse to `a.b.c`)
//! - Recursive, depth-bounded relation expansion driven by the collection
//!   schema, with a caller supplied [`RelationFetcher`]
//! - Cardinality-aware attachment (single relations store one record,
//!   multi relations store an ordered list)
//! - Sort expression parsing (`-name,+created`) and rendering through a
//!   pluggable field resolver
//! - An in-memory [`MemoryStore`] usable as lookup and fetcher
//!
//! ## Expanding relations
//!
//! ```rust
//! use std::sync::Arc;
//! use tether_query::{QueryResult, RecordExpander};
//! use tether_schema::{
//!     Collection, CollectionRegistry, ExpandValue, Field, Record, RelationOptions,
//! };
//!
//! let mut registry = CollectionRegistry::new();
//! registry.register(Collection::new("c_tags", "tags"))?;
//! let posts = registry.register(
//!     Collection::new("c_posts", "posts")
//!         .with_field(Field::relation("tags", RelationOptions::new("c_tags"))),
//! )?;
//!
//! // Any closure of this shape is a relation fetcher.
//! let fetch = |collection: &Arc<Collection>, ids: &[String]| -> QueryResult<Vec<Record>> {
//!     Ok(ids
//!         .iter()
//!         .filter(|id| id.as_str() != "t404")
//!         .map(|id| Record::new(Arc::clone(collection), id.as_str()))
//!         .collect())
//! };
//!
//! let mut post = Record::new(posts, "p1").with("tags", serde_json::json!(["t1", "t404", "t2"]));
//! RecordExpander::new(&registry)
//!     .with_fetcher(&fetch)
//!     .expand_one(&mut post, &["tags"])?;
//!
//! let tags = post.get_expand("tags").and_then(ExpandValue::as_many).unwrap();
//! assert_eq!(tags.len(), 2);
//! # Ok::<(), tether_query::QueryError>(())
//! ```
//!
//! ## Sorting
//!
//! ```rust
//! use tether_query::{SimpleFieldResolver, build_order_by, parse_sort};
//!
//! let resolver = SimpleFieldResolver::new(["name", "created"]);
//! let order = build_order_by(&parse_sort("-created,name"), &resolver)?;
//! assert_eq!(order.to_sql(), "created DESC, name ASC");
//! # Ok::<(), tether_query::QueryError>(())
//! ```

pub mod error;
pub mod expand;
pub mod logging;
pub mod sort;
pub mod store;
pub mod types;

pub use error::{ErrorCode, ErrorContext, QueryError, QueryResult};
pub use expand::{
    BatchedFetcher, MAX_EXPAND_DEPTH, RecordExpander, RelationFetcher, expand_record,
    expand_records, normalize_expands,
};
pub use sort::{
    FieldResolver, ResolvedField, SimpleFieldResolver, SortField, build_order_by, parse_sort,
};
pub use store::MemoryStore;
pub use types::{OrderBy, OrderByField, SortOrder};

// Re-export logging utilities
pub use logging::{get_log_format, get_log_level, init as init_logging, is_debug_enabled};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::expand::{RecordExpander, RelationFetcher, normalize_expands};
    pub use crate::sort::{FieldResolver, SortField, parse_sort};
    pub use crate::store::MemoryStore;
    pub use crate::types::SortOrder;
}
