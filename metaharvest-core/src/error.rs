//! Error types for configuration resolution and metadata extraction.
//!
//! All error types in this module ensure that source credentials are never
//! exposed in error messages, logs, or any output format. Fatal
//! configuration-time errors name the offending source type or schema so an
//! operator can act on them; per-table extraction errors carry enough context
//! to be logged and skipped.

use thiserror::Error;

/// Main error type for metaharvest operations.
///
/// # Security
/// All error messages are sanitized to prevent credential leakage.
/// Passwords and tokens are never included in error output.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Source type tag is not present in any service category
    #[error("Cannot find the service type of {source_type}")]
    UnknownSourceType { source_type: String },

    /// Source type classified but no connection schema is registered for it
    #[error("No connection schema registered for {source_type} ({category} service)")]
    ConnectionSchemaNotFound {
        source_type: String,
        category: String,
    },

    /// Connector constructed with the wrong concrete connection type
    #[error("Expected {expected}, but got {actual}")]
    InvalidSource {
        expected: &'static str,
        actual: String,
    },

    /// Required field absent from the raw configuration document
    #[error("Missing required field: {path}")]
    MissingField { path: String },

    /// Full-union validation failed and the narrowed schema also rejected
    /// the connection block (scoped diagnostic)
    #[error("Invalid {source_type} connection configuration")]
    ConfigValidation {
        source_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration or setup error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Database or table enumeration failed; nothing can be discovered
    #[error("Enumeration failed: {context}")]
    Enumeration {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Engine query execution failed
    #[error("Query execution failed: {context}")]
    Query {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failure assembling one table's extraction record
    #[error("Extraction failed: {context}")]
    Extraction {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with HarvestError
pub type Result<T> = std::result::Result<T, HarvestError>;

impl HarvestError {
    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an enumeration error with context
    pub fn enumeration_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Enumeration {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a query execution error with context
    pub fn query_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Query {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a per-table extraction error with context
    pub fn extraction_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Extraction {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a missing-field error for a config document path
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }

    /// True for errors that abort the run at configuration time.
    ///
    /// Per-table extraction and query errors are recovered at the per-table
    /// boundary and are not fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Extraction { .. } | Self::Query { .. })
    }
}
