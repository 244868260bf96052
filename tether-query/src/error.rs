//! Error types for relation expansion and sort rendering.
//!
//! Errors carry a numeric [`ErrorCode`] for programmatic handling plus an
//! [`ErrorContext`] naming the collection and field involved.
//!
//! # Error Codes
//!
//! Error codes follow a pattern: T{category}{number}
//! - 1xxx: Schema resolution errors (unknown field, unknown collection)
//! - 2xxx: Sort errors
//! - 5xxx: Fetch errors raised by relation fetchers
//! - 7xxx: Configuration errors
//! - 9xxx: Internal errors
//!
//! ```rust
//! use tether_query::{ErrorCode, QueryError};
//!
//! let err = QueryError::field_not_found("author", "posts");
//! assert_eq!(err.code, ErrorCode::FieldNotFound);
//! assert!(err.to_string().contains("author"));
//! assert!(err.to_string().contains("posts"));
//! ```

use std::fmt;
use thiserror::Error;

use tether_schema::SchemaError;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Schema resolution errors (1xxx)
    /// Expand path names a field missing from the collection schema (T1001).
    FieldNotFound = 1001,
    /// Expand path names a field that is not a relation (T1002).
    NotARelation = 1002,
    /// Relation target collection could not be found (T1003).
    CollectionNotFound = 1003,

    // Sort errors (2xxx)
    /// Sort field could not be rendered (T2001).
    InvalidSortField = 2001,

    // Fetch errors (5xxx)
    /// Relation fetcher failed (T5001).
    FetchFailed = 5001,

    // Configuration errors (7xxx)
    /// Required collaborator or setting missing (T7001).
    MissingConfiguration = 7001,
    /// Invalid configuration (T7002).
    InvalidConfiguration = 7002,

    // Internal errors (9xxx)
    /// Internal error (T9001).
    Internal = 9001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "T1001").
    pub fn code(&self) -> String {
        format!("T{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::FieldNotFound => "Field not found",
            Self::NotARelation => "Field is not a relation",
            Self::CollectionNotFound => "Collection not found",
            Self::InvalidSortField => "Invalid sort field",
            Self::FetchFailed => "Relation fetch failed",
            Self::MissingConfiguration => "Missing configuration",
            Self::InvalidConfiguration => "Invalid configuration",
            Self::Internal => "Internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that was being performed.
    pub operation: Option<String>,
    /// The collection involved.
    pub collection: Option<String>,
    /// The field involved.
    pub field: Option<String>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<String>,
    /// Help text.
    pub help: Option<String>,
}

/// Errors that can occur while expanding relations or rendering sorts.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add context about the operation.
    pub fn with_context(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(suggestion.into());
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    /// Set the collection.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.context.collection = Some(collection.into());
        self
    }

    /// Set the field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.context.field = Some(field.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// Create a field not found error.
    pub fn field_not_found(field: impl Into<String>, collection: impl Into<String>) -> Self {
        let field = field.into();
        let collection = collection.into();
        Self::new(
            ErrorCode::FieldNotFound,
            format!("Couldn't find field {:?} in collection {:?}", field, collection),
        )
        .with_collection(&collection)
        .with_field(&field)
        .with_suggestion("Check the expand path for typos")
    }

    /// Create an error for an expand segment that is not a relation field.
    pub fn not_a_relation(field: impl Into<String>, collection: impl Into<String>) -> Self {
        let field = field.into();
        let collection = collection.into();
        Self::new(
            ErrorCode::NotARelation,
            format!("Field {:?} in collection {:?} is not a relation", field, collection),
        )
        .with_collection(&collection)
        .with_field(&field)
        .with_help("Only relation fields can be expanded")
    }

    /// Create a collection not found error.
    pub fn collection_not_found(collection: impl Into<String>) -> Self {
        let collection = collection.into();
        Self::new(
            ErrorCode::CollectionNotFound,
            format!("Couldn't find collection {:?}", collection),
        )
        .with_collection(&collection)
        .with_suggestion("Register the relation target collection")
    }

    /// Create a missing fetcher error.
    pub fn missing_fetcher() -> Self {
        Self::new(
            ErrorCode::MissingConfiguration,
            "Relation records fetcher is not set",
        )
        .with_suggestion("Provide a fetcher with RecordExpander::with_fetcher")
    }

    /// Create an invalid sort field error.
    pub fn invalid_sort(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(
            ErrorCode::InvalidSortField,
            format!("Invalid sort field {:?}", field),
        )
        .with_field(&field)
    }

    /// Create a fetch error for fetcher implementations.
    pub fn fetch_failed(collection: impl Into<String>, message: impl Into<String>) -> Self {
        let collection = collection.into();
        let message = message.into();
        Self::new(
            ErrorCode::FetchFailed,
            format!("Failed to fetch {} records: {}", collection, message),
        )
        .with_collection(&collection)
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfiguration, message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(ErrorCode::Internal, format!("Internal error: {}", message))
    }

    // ============== Error Checks ==============

    /// Check if this error comes from resolving the schema.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::FieldNotFound | ErrorCode::NotARelation | ErrorCode::CollectionNotFound
        )
    }

    /// Check if this is a configuration error.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::MissingConfiguration | ErrorCode::InvalidConfiguration
        )
    }

    /// Check if this error was raised by a relation fetcher.
    pub fn is_fetch_error(&self) -> bool {
        self.code == ErrorCode::FetchFailed
    }

    // ============== Display Functions ==============

    /// Display the full error with all context and suggestions.
    pub fn display_full(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error [{}]: {}\n", self.code.code(), self.message));

        if let Some(ref op) = self.context.operation {
            output.push_str(&format!("  → While: {}\n", op));
        }
        if let Some(ref collection) = self.context.collection {
            output.push_str(&format!("  → Collection: {}\n", collection));
        }
        if let Some(ref field) = self.context.field {
            output.push_str(&format!("  → Field: {}\n", field));
        }

        if !self.context.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.context.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        if let Some(ref help) = self.context.help {
            output.push_str(&format!("\nHelp: {}\n", help));
        }

        output
    }
}

impl From<SchemaError> for QueryError {
    fn from(err: SchemaError) -> Self {
        Self::invalid_configuration(err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::FieldNotFound.code(), "T1001");
        assert_eq!(ErrorCode::InvalidSortField.code(), "T2001");
        assert_eq!(ErrorCode::MissingConfiguration.code(), "T7001");
        assert_eq!(ErrorCode::CollectionNotFound.description(), "Collection not found");
    }

    #[test]
    fn test_field_not_found_names_field_and_collection() {
        let err = QueryError::field_not_found("author", "posts");
        assert!(err.is_schema_error());
        assert_eq!(
            err.to_string(),
            r#"[T1001] Couldn't find field "author" in collection "posts""#
        );
        assert_eq!(err.context.collection.as_deref(), Some("posts"));
        assert_eq!(err.context.field.as_deref(), Some("author"));
    }

    #[test]
    fn test_error_classes() {
        assert!(QueryError::missing_fetcher().is_configuration_error());
        assert!(!QueryError::missing_fetcher().is_schema_error());
        assert!(QueryError::collection_not_found("c_users").is_schema_error());
        assert!(QueryError::not_a_relation("title", "posts").is_schema_error());
        assert!(QueryError::fetch_failed("users", "timeout").is_fetch_error());
    }

    #[test]
    fn test_from_schema_error() {
        let err: QueryError = SchemaError::config("bad depth").into();
        assert!(err.is_configuration_error());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display_full() {
        let err = QueryError::field_not_found("author", "posts").with_context("Expanding posts");

        let output = err.display_full();
        assert!(output.contains("T1001"));
        assert!(output.contains("Collection: posts"));
        assert!(output.contains("Field: author"));
        assert!(output.contains("While: Expanding posts"));
        assert!(output.contains("Suggestions"));
    }
}
