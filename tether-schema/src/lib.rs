//! # tether-schema
//!
//! Collection schema, record model and configuration for Tether.
//!
//! This crate provides:
//! - [`Collection`] and [`Field`] definitions, with relation options carried
//!   only by the relation field kind
//! - [`Record`]s with raw field values and expand data
//! - A [`CollectionRegistry`] resolving collections by id or name
//! - Configuration parsing for `tether.toml` files
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tether_schema::{Collection, CollectionRegistry, Field, Record, RelationOptions};
//!
//! let mut registry = CollectionRegistry::new();
//! registry.register(Collection::new("c_users", "users").with_field(Field::text("name")))?;
//! let posts = registry.register(
//!     Collection::new("c_posts", "posts")
//!         .with_field(Field::relation("author", RelationOptions::new("c_users").single())),
//! )?;
//! registry.validate_relations()?;
//!
//! let post = Record::new(Arc::clone(&posts), "p1").with("author", "u1");
//! assert_eq!(post.string_list("author"), vec!["u1"]);
//! # Ok::<(), tether_schema::SchemaError>(())
//! ```

pub mod config;
pub mod error;
pub mod model;

pub use config::{
    DEFAULT_BATCH_SIZE, DEFAULT_MAX_EXPAND_DEPTH, DebugConfig, ExpandConfig, TetherConfig,
};
pub use error::{SchemaError, SchemaResult};
pub use model::{
    Collection, CollectionLookup, CollectionRegistry, ExpandMap, ExpandValue, Field, FieldKind,
    Record, RelationOptions,
};
