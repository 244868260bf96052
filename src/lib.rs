//! # Tether
//!
//! Schema-driven relation expansion for record stores.
//!
//! Tether provides:
//! - Collection schemas whose relation fields point at other collections
//! - Records carrying raw field values plus the related records attached
//!   to them by expansion
//! - Depth-bounded, batched expansion of dotted relation paths
//!   (`author.publisher`) through a pluggable fetcher
//! - Sort expression parsing (`-created,title`) into `ORDER BY` terms
//! - Configuration through `tether.toml`
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tether::prelude::*;
//!
//! let store = MemoryStore::new();
//! let users = store.register(
//!     Collection::new("c_users", "users").with_field(Field::text("name")),
//! )?;
//! let posts = store.register(
//!     Collection::new("c_posts", "posts")
//!         .with_field(Field::text("title"))
//!         .with_field(Field::relation("author", RelationOptions::new("c_users").single())),
//! )?;
//! store.insert(Record::new(Arc::clone(&users), "u1").with("name", "Ada"))?;
//!
//! let mut post = Record::new(posts, "p1").with("author", "u1");
//! RecordExpander::new(&store)
//!     .with_fetcher(&store)
//!     .expand_one(&mut post, &["author"])?;
//!
//! let json = serde_json::to_value(&post).unwrap();
//! assert_eq!(json["expand"]["author"]["name"], "Ada");
//! # Ok::<(), tether::QueryError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Collection schema, record model and configuration.
pub mod schema {
    pub use tether_schema::*;
}

/// Relation expansion, sort parsing and the in-memory store.
pub mod query {
    pub use tether_query::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::query::prelude::*;
    pub use crate::schema::{
        Collection, CollectionLookup, CollectionRegistry, ExpandValue, Field, Record,
        RelationOptions, TetherConfig,
    };
}

// Re-export key types at the crate root
pub use query::{QueryError, QueryResult, RecordExpander};
pub use schema::{SchemaError, TetherConfig};
