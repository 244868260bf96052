//! Sort expression parsing.
//!
//! A sort expression is a comma separated list of field names, each
//! optionally prefixed with `+` (ascending, the default) or `-` (descending).
//!
//! ```rust
//! use tether_query::sort::{SimpleFieldResolver, parse_sort};
//! use tether_query::SortOrder;
//!
//! let fields = parse_sort("-name,+created");
//! assert_eq!(fields[0].name, "name");
//! assert_eq!(fields[0].direction, SortOrder::Desc);
//!
//! let resolver = SimpleFieldResolver::new(["name", "created"]);
//! assert_eq!(fields[0].build_expr(&resolver).unwrap(), "name DESC");
//! ```

mod resolver;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::types::{OrderBy, OrderByField, SortOrder};

pub use resolver::{FieldResolver, ResolvedField, SimpleFieldResolver};

/// A single parsed sort field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Field name as written in the expression.
    pub name: String,
    /// Sort direction.
    pub direction: SortOrder,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(name: impl Into<String>, direction: SortOrder) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    /// Resolve the field into an order by term.
    ///
    /// Resolver failures, parameterized expressions, empty identifiers and
    /// `null` are rejected.
    pub fn to_order_by(&self, resolver: &dyn FieldResolver) -> QueryResult<OrderByField> {
        let resolved = resolver
            .resolve(&self.name)
            .map_err(|e| QueryError::invalid_sort(&self.name).with_source(e))?;

        if !resolved.params.is_empty()
            || resolved.identifier.is_empty()
            || resolved.identifier.eq_ignore_ascii_case("null")
        {
            return Err(QueryError::invalid_sort(&self.name));
        }

        Ok(OrderByField::new(resolved.identifier, self.direction))
    }

    /// Render the field as `"<identifier> <ASC|DESC>"`.
    pub fn build_expr(&self, resolver: &dyn FieldResolver) -> QueryResult<String> {
        Ok(self.to_order_by(resolver)?.to_sql())
    }
}

/// Parse a sort expression into sort fields.
///
/// Entries are trimmed; empty entries are kept as empty names and rejected
/// later when rendered.
pub fn parse_sort(expr: &str) -> Vec<SortField> {
    expr.split(',')
        .map(|entry| {
            let entry = entry.trim();
            match entry.strip_prefix('-') {
                Some(name) => SortField::new(name, SortOrder::Desc),
                None => SortField::new(entry.strip_prefix('+').unwrap_or(entry), SortOrder::Asc),
            }
        })
        .collect()
}

/// Render parsed sort fields into a single [`OrderBy`].
pub fn build_order_by(fields: &[SortField], resolver: &dyn FieldResolver) -> QueryResult<OrderBy> {
    let terms = fields
        .iter()
        .map(|field| field.to_order_by(resolver))
        .collect::<QueryResult<Vec<_>>>()?;
    Ok(OrderBy::from_fields(terms))
}
