//! Catalog inspector with the Snowflake-specific overrides.
//!
//! Four behaviors differ from the generic information_schema defaults:
//! table listing returns identity, kind, and comment in one round trip
//! instead of a follow-up comment query per table; comment lookup matches
//! case-insensitively; identifier normalization is the identity because the
//! catalog is case-stable; and unique constraints are always empty because
//! Snowflake does not expose them through this path. Column listing and view
//! definitions delegate to the generic implementations.

use crate::catalog::{CatalogInspector, TableEntry, generic};
use crate::engine::{SqlEngine, quote_literal};
use crate::error::Result;
use crate::models::{ColumnDescriptor, DatabaseContext, TableKind};
use async_trait::async_trait;
use std::sync::Arc;

/// Identity, kind, and comment for every table and view in one query.
const FETCH_TABLE_METADATA: &str = "select table_catalog, table_schema, table_name, \
     table_type, comment \
     from information_schema.tables \
     where table_schema <> 'INFORMATION_SCHEMA' \
     order by table_schema, table_name";

/// Stateless inspector bound to one database context.
pub struct SnowflakeInspector {
    engine: Arc<dyn SqlEngine>,
    context: DatabaseContext,
}

impl SnowflakeInspector {
    pub fn new(engine: Arc<dyn SqlEngine>, context: DatabaseContext) -> Self {
        Self { engine, context }
    }

    pub fn context(&self) -> &DatabaseContext {
        &self.context
    }
}

#[async_trait]
impl CatalogInspector for SnowflakeInspector {
    async fn list_tables(&self) -> Result<Vec<TableEntry>> {
        let rows = self.engine.fetch_all(FETCH_TABLE_METADATA).await?;

        let mut entries = Vec::with_capacity(rows.rows.len());
        for row in &rows.rows {
            let database = rows
                .get_str(row, "table_catalog")
                .unwrap_or(&self.context.database)
                .to_string();
            let schema = rows
                .get_str(row, "table_schema")
                .unwrap_or_default()
                .to_string();
            let name = rows
                .get_str(row, "table_name")
                .unwrap_or_default()
                .to_string();
            let kind = match rows.get_str(row, "table_type") {
                Some(kind) if kind.eq_ignore_ascii_case("base table") => TableKind::Regular,
                _ => TableKind::View,
            };
            let comment = rows
                .get_str(row, "comment")
                .filter(|c| !c.is_empty())
                .map(str::to_string);

            entries.push(TableEntry {
                database,
                schema,
                name,
                kind,
                comment,
            });
        }

        Ok(entries)
    }

    async fn list_columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let mut columns = generic::list_columns(
            self.engine.as_ref(),
            schema,
            table,
            super::map_snowflake_type,
        )
        .await?;

        for group in self.unique_constraints(schema, table).await? {
            for column in &mut columns {
                if group.contains(&column.name) {
                    column.is_unique = true;
                }
            }
        }

        Ok(columns)
    }

    async fn view_definition(&self, schema: &str, table: &str) -> Result<Option<String>> {
        generic::view_definition(self.engine.as_ref(), schema, table).await
    }

    async fn table_comment(&self, schema: &str, table: &str) -> Result<Option<String>> {
        let query = format!(
            "select comment from information_schema.tables \
             where table_schema ilike '{}' and table_name ilike '{}'",
            quote_literal(&self.normalize_name(schema)),
            quote_literal(table)
        );

        let rows = self.engine.fetch_all(&query).await?;
        Ok(rows
            .rows
            .first()
            .and_then(|row| rows.get_str(row, "comment"))
            .filter(|c| !c.is_empty())
            .map(str::to_string))
    }

    async fn unique_constraints(&self, _schema: &str, _table: &str) -> Result<Vec<Vec<String>>> {
        // Not exposed through this catalog path; empty rather than an error.
        Ok(Vec::new())
    }

    fn normalize_name(&self, name: &str) -> String {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::QueryRows;
    use crate::error::HarvestError;

    struct OneTableEngine;

    #[async_trait]
    impl SqlEngine for OneTableEngine {
        async fn fetch_all(&self, sql: &str) -> Result<QueryRows> {
            if sql.contains("table_type") {
                return Ok(QueryRows {
                    columns: vec![
                        "table_catalog".to_string(),
                        "table_schema".to_string(),
                        "table_name".to_string(),
                        "table_type".to_string(),
                        "comment".to_string(),
                    ],
                    rows: vec![
                        vec![
                            serde_json::json!("ANALYTICS"),
                            serde_json::json!("PUBLIC"),
                            serde_json::json!("orders"),
                            serde_json::json!("BASE TABLE"),
                            serde_json::json!("order facts"),
                        ],
                        vec![
                            serde_json::json!("ANALYTICS"),
                            serde_json::json!("PUBLIC"),
                            serde_json::json!("orders_v"),
                            serde_json::json!("VIEW"),
                            serde_json::Value::Null,
                        ],
                    ],
                });
            }
            Err(HarvestError::configuration("unexpected query"))
        }

        async fn execute(&self, _: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_list_tables_single_round_trip() {
        let inspector = SnowflakeInspector::new(
            Arc::new(OneTableEngine),
            DatabaseContext::new("ANALYTICS"),
        );

        let entries = inspector.list_tables().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "orders");
        assert_eq!(entries[0].kind, TableKind::Regular);
        assert_eq!(entries[0].comment.as_deref(), Some("order facts"));
        assert_eq!(entries[1].kind, TableKind::View);
        assert!(entries[1].comment.is_none());
    }

    #[tokio::test]
    async fn test_unique_constraints_always_empty() {
        let inspector = SnowflakeInspector::new(
            Arc::new(OneTableEngine),
            DatabaseContext::new("ANALYTICS"),
        );
        let constraints = inspector
            .unique_constraints("PUBLIC", "orders")
            .await
            .unwrap();
        assert!(constraints.is_empty());
    }

    #[test]
    fn test_normalize_name_is_identity() {
        let inspector = SnowflakeInspector::new(
            Arc::new(OneTableEngine),
            DatabaseContext::new("ANALYTICS"),
        );
        assert_eq!(inspector.normalize_name("MixedCase"), "MixedCase");
    }
}
