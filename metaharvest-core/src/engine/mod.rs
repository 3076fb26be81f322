//! SQL engine seam.
//!
//! The extraction pipeline only needs two capabilities from the underlying
//! engine: run a read-only query and get rows back, or run a side-effecting
//! statement (context switches). Everything about transport, pooling, and
//! timeouts lives behind this trait; the core defines no timeout policy of
//! its own.

use crate::Result;
use async_trait::async_trait;

#[cfg(feature = "rest-engine")]
pub mod rest;

#[cfg(feature = "rest-engine")]
pub use rest::RestSqlEngine;

/// Result set of one query: column names plus rows of JSON cell values.
#[derive(Debug, Clone, Default)]
pub struct QueryRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl QueryRows {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by case-insensitive name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    /// String value of a named column in one row, if present and non-null.
    pub fn get_str<'a>(&self, row: &'a [serde_json::Value], name: &str) -> Option<&'a str> {
        let idx = self.column_index(name)?;
        row.get(idx).and_then(serde_json::Value::as_str)
    }
}

/// Object-safe query-execution capability over a shared engine handle.
///
/// The handle carries the active session context (current database), so a
/// `USE` statement issued through [`SqlEngine::execute`] affects subsequent
/// queries. The pipeline assumes exclusive single-consumer use; no internal
/// locking is provided.
#[async_trait]
pub trait SqlEngine: Send + Sync {
    /// Executes a read-only query and returns all rows.
    async fn fetch_all(&self, sql: &str) -> Result<QueryRows>;

    /// Executes a statement for its side effect (e.g. a context switch).
    async fn execute(&self, sql: &str) -> Result<()>;
}

/// Escapes a string literal for inline use in a catalog query.
pub fn quote_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Quotes an identifier for exact-case use.
pub fn quote_ident(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
