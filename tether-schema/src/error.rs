//! Error types for collection schemas and configuration.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while building schemas or loading configuration.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(tether::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid collection definition.
    #[error("invalid collection `{name}`: {message}")]
    #[diagnostic(code(tether::schema::invalid_collection))]
    InvalidCollection { name: String, message: String },

    /// Invalid field definition.
    #[error("invalid field `{collection}.{field}`: {message}")]
    #[diagnostic(code(tether::schema::invalid_field))]
    InvalidField {
        collection: String,
        field: String,
        message: String,
    },

    /// Invalid relation definition.
    #[error("invalid relation `{collection}.{field}`: {message}")]
    #[diagnostic(
        code(tether::schema::invalid_relation),
        help("register the target collection before validating relations")
    )]
    InvalidRelation {
        collection: String,
        field: String,
        message: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} `{name}`")]
    #[diagnostic(code(tether::schema::duplicate))]
    Duplicate { kind: String, name: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    #[diagnostic(code(tether::schema::config_error))]
    ConfigError { message: String },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(tether::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// Validation error with multiple issues.
    #[error("schema validation failed with {count} error(s)")]
    #[diagnostic(code(tether::schema::validation_failed))]
    ValidationFailed {
        count: usize,
        #[related]
        errors: Vec<SchemaError>,
    },
}

impl SchemaError {
    /// Create an invalid collection error.
    pub fn invalid_collection(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCollection {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(
        collection: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            collection: collection.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid relation error.
    pub fn invalid_relation(
        collection: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidRelation {
            collection: collection.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Collapse a list of errors into a single result.
    pub fn collect(mut errors: Vec<SchemaError>) -> SchemaResult<()> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            count => Err(Self::ValidationFailed { count, errors }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SchemaError::invalid_field("posts", "author", "name must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid field `posts.author`: name must not be empty"
        );

        let err = SchemaError::duplicate("collection", "users");
        assert_eq!(err.to_string(), "duplicate collection `users`");
    }

    #[test]
    fn test_collect_errors() {
        assert!(SchemaError::collect(vec![]).is_ok());

        let single = SchemaError::collect(vec![SchemaError::config("bad")]).unwrap_err();
        assert!(matches!(single, SchemaError::ConfigError { .. }));

        let many = SchemaError::collect(vec![
            SchemaError::config("a"),
            SchemaError::config("b"),
        ])
        .unwrap_err();
        assert!(matches!(many, SchemaError::ValidationFailed { count: 2, .. }));
    }
}
