//! Catalog inspection capability set.
//!
//! A [`CatalogInspector`] answers metadata questions about the active
//! database context: which tables exist, their columns, comments, view
//! definitions, and unique constraints. The [`generic`] module holds
//! information_schema-based implementations that concrete inspectors
//! delegate to; a source-specific inspector overrides only the operations
//! whose generic behavior is wrong or missing for its engine.
//!
//! Inspectors are stateless over a shared engine handle; any caching of
//! catalog answers belongs to the engine, not here.

use crate::Result;
use crate::models::{ColumnDescriptor, TableKind};
use async_trait::async_trait;

pub mod generic;

/// One row of a table listing: identity, kind, and comment in one place.
#[derive(Debug, Clone)]
pub struct TableEntry {
    pub database: String,
    pub schema: String,
    pub name: String,
    pub kind: TableKind,
    pub comment: Option<String>,
}

/// Catalog-query capability set over the active database context.
#[async_trait]
pub trait CatalogInspector: Send + Sync {
    /// Lists tables and views visible in the active context.
    async fn list_tables(&self) -> Result<Vec<TableEntry>>;

    /// Lists the columns of one table in ordinal order.
    async fn list_columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// Definition text for a view; `None` for base tables or when the
    /// catalog has no definition recorded.
    async fn view_definition(&self, schema: &str, table: &str) -> Result<Option<String>>;

    /// Comment attached to a table, if any.
    async fn table_comment(&self, schema: &str, table: &str) -> Result<Option<String>>;

    /// Column groups of the table's unique constraints.
    async fn unique_constraints(&self, schema: &str, table: &str) -> Result<Vec<Vec<String>>>;

    /// Normalizes an identifier the way the source's catalog stores it.
    ///
    /// Generic engines fold unquoted identifiers to lowercase; case-stable
    /// catalogs override this with the identity.
    fn normalize_name(&self, name: &str) -> String {
        name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Folding;

    #[async_trait]
    impl CatalogInspector for Folding {
        async fn list_tables(&self) -> Result<Vec<TableEntry>> {
            Ok(Vec::new())
        }
        async fn list_columns(&self, _: &str, _: &str) -> Result<Vec<ColumnDescriptor>> {
            Ok(Vec::new())
        }
        async fn view_definition(&self, _: &str, _: &str) -> Result<Option<String>> {
            Ok(None)
        }
        async fn table_comment(&self, _: &str, _: &str) -> Result<Option<String>> {
            Ok(None)
        }
        async fn unique_constraints(&self, _: &str, _: &str) -> Result<Vec<Vec<String>>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_default_normalization_folds_case() {
        let inspector = Folding;
        assert_eq!(inspector.normalize_name("PUBLIC"), "public");
    }
}
