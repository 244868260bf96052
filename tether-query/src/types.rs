//! Ordering types rendered from sort expressions.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Sort order for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl SortOrder {
    /// Get the SQL keyword for this sort order.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

/// Order by specification for a single resolved column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByField {
    /// The column expression to order by.
    pub column: Cow<'static, str>,
    /// The sort order.
    pub order: SortOrder,
}

impl OrderByField {
    /// Create a new order by field.
    pub fn new(column: impl Into<Cow<'static, str>>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }

    /// Create an ascending order.
    pub fn asc(column: impl Into<Cow<'static, str>>) -> Self {
        Self::new(column, SortOrder::Asc)
    }

    /// Create a descending order.
    pub fn desc(column: impl Into<Cow<'static, str>>) -> Self {
        Self::new(column, SortOrder::Desc)
    }

    /// Generate the SQL for this order by field.
    pub fn to_sql(&self) -> String {
        let mut sql = String::with_capacity(self.estimated_len());
        self.write_sql(&mut sql);
        sql
    }

    /// Write the SQL directly to a buffer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tether_query::types::OrderByField;
    ///
    /// let field = OrderByField::desc("created");
    /// let mut buffer = String::from("ORDER BY ");
    /// field.write_sql(&mut buffer);
    /// assert_eq!(buffer, "ORDER BY created DESC");
    /// ```
    #[inline]
    pub fn write_sql(&self, buffer: &mut String) {
        buffer.push_str(&self.column);
        buffer.push(' ');
        buffer.push_str(self.order.as_sql());
    }

    #[inline]
    fn estimated_len(&self) -> usize {
        self.column.len() + 5
    }
}

/// Order by specification that can be a single field or multiple fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBy {
    /// Order by a single field.
    Field(OrderByField),
    /// Order by multiple fields.
    Fields(Box<[OrderByField]>),
}

impl OrderBy {
    /// Create an empty order by (no ordering).
    pub fn none() -> Self {
        Self::Fields(Box::new([]))
    }

    /// Check if the order by is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Field(_) => false,
            Self::Fields(fields) => fields.is_empty(),
        }
    }

    /// Number of ordering terms.
    pub fn len(&self) -> usize {
        match self {
            Self::Field(_) => 1,
            Self::Fields(fields) => fields.len(),
        }
    }

    /// Add a field to the order by.
    pub fn then(self, field: OrderByField) -> Self {
        match self {
            Self::Field(existing) => Self::Fields(vec![existing, field].into_boxed_slice()),
            Self::Fields(existing) => {
                let mut fields: Vec<_> = existing.into_vec();
                fields.push(field);
                Self::Fields(fields.into_boxed_slice())
            }
        }
    }

    /// Create an OrderBy from multiple fields.
    pub fn from_fields(fields: impl IntoIterator<Item = OrderByField>) -> Self {
        let mut fields: Vec<_> = fields.into_iter().collect();
        match fields.len() {
            1 => Self::Field(fields.remove(0)),
            _ => Self::Fields(fields.into_boxed_slice()),
        }
    }

    /// Generate the ORDER BY clause body (without the "ORDER BY" keyword).
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();
        self.write_sql(&mut sql);
        sql
    }

    /// Write the ORDER BY clause body directly to a buffer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tether_query::types::{OrderBy, OrderByField};
    ///
    /// let order = OrderBy::from_fields([
    ///     OrderByField::desc("created"),
    ///     OrderByField::asc("id"),
    /// ]);
    /// let mut buffer = String::from("ORDER BY ");
    /// order.write_sql(&mut buffer);
    /// assert_eq!(buffer, "ORDER BY created DESC, id ASC");
    /// ```
    #[inline]
    pub fn write_sql(&self, buffer: &mut String) {
        match self {
            Self::Field(field) => field.write_sql(buffer),
            Self::Fields(fields) => {
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        buffer.push_str(", ");
                    }
                    field.write_sql(buffer);
                }
            }
        }
    }
}

impl From<OrderByField> for OrderBy {
    fn from(field: OrderByField) -> Self {
        Self::Field(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_serde() {
        assert_eq!(serde_json::to_string(&SortOrder::Desc).unwrap(), "\"DESC\"");
        let order: SortOrder = serde_json::from_str("\"ASC\"").unwrap();
        assert_eq!(order, SortOrder::Asc);
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }

    #[test]
    fn test_order_by_composition() {
        let order = OrderBy::from(OrderByField::asc("name")).then(OrderByField::desc("created"));
        assert_eq!(order.len(), 2);
        assert_eq!(order.to_sql(), "name ASC, created DESC");

        assert!(OrderBy::none().is_empty());
        assert!(OrderBy::from_fields([]).is_empty());
        assert_eq!(OrderBy::from_fields([OrderByField::asc("id")]).to_sql(), "id ASC");
    }
}
