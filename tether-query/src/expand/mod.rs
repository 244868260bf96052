//! Relation expansion for loaded records.
//!
//! This module resolves dotted expand paths (`author.publisher`) against the
//! collection schema, fetches the referenced records in one batch per
//! relation hop and attaches them to the owning records:
//! - `normalize_expands` reduces user input to a canonical path set
//! - `RecordExpander` walks each path, bounded by `MAX_EXPAND_DEPTH`
//! - `RelationFetcher` is the caller supplied lookup of records by id
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tether_query::expand::RecordExpander;
//! use tether_query::store::MemoryStore;
//! use tether_schema::{Collection, Field, Record, RelationOptions};
//!
//! let store = MemoryStore::new();
//! let users = store.register(
//!     Collection::new("c_users", "users").with_field(Field::text("name")),
//! )?;
//! let posts = store.register(
//!     Collection::new("c_posts", "posts")
//!         .with_field(Field::relation("author", RelationOptions::new("c_users").single())),
//! )?;
//! store.insert(Record::new(users, "u1").with("name", "Ada"))?;
//!
//! let mut post = Record::new(posts, "p1").with("author", "u1");
//! RecordExpander::new(&store)
//!     .with_fetcher(&store)
//!     .expand_one(&mut post, &["author"])?;
//!
//! let author = post.get_expand("author").and_then(|v| v.as_one()).unwrap();
//! assert_eq!(author.id(), "u1");
//! # Ok::<(), tether_query::QueryError>(())
//! ```

mod engine;
mod fetcher;
mod path;

pub use engine::{MAX_EXPAND_DEPTH, RecordExpander, expand_record, expand_records};
pub use fetcher::{BatchedFetcher, RelationFetcher};
pub use path::{normalize_expands, split_head};
