//! Collection schema and record model.
//!
//! A [`Collection`] owns an ordered set of [`Field`]s. Relation fields carry
//! [`RelationOptions`] naming the target collection and the multiplicity of
//! the relation. [`Record`]s belong to one collection and hold raw field
//! values plus the expand data written by relation expansion.

mod collection;
mod field;
mod record;
mod registry;

pub use collection::Collection;
pub use field::{Field, FieldKind, RelationOptions};
pub use record::{ExpandMap, ExpandValue, Record};
pub use registry::{CollectionLookup, CollectionRegistry};
