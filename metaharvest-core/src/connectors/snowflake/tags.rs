//! Tag-reference queries.
//!
//! Snowflake exposes object tags through the TAG_REFERENCES table function.
//! The schema context must be active before the call, so a `USE` statement
//! precedes the query. Errors here are deliberately not caught locally; they
//! propagate to the per-table boundary handler.

use crate::engine::{SqlEngine, quote_literal};
use crate::error::Result;
use crate::models::{DatabaseContext, Tag};

/// Tag references for one object; placeholders are object name and domain.
const FETCH_TAGS: &str =
    "select * from table(information_schema.tag_references('{}', '{}'))";

/// Fetches (category, value) tag pairs attached to one table.
pub(crate) async fn fetch_tags(
    engine: &dyn SqlEngine,
    context: &DatabaseContext,
    schema: &str,
    table: &str,
    object_type: &str,
) -> Result<Vec<Tag>> {
    engine
        .execute(&format!("USE {}.{}", context.database, schema))
        .await?;

    let query = FETCH_TAGS
        .replacen("{}", &quote_literal(table), 1)
        .replacen("{}", &quote_literal(object_type), 1);
    let rows = engine.fetch_all(&query).await?;

    let mut tags = Vec::with_capacity(rows.rows.len());
    for row in &rows.rows {
        let Some(category) = rows.get_str(row, "tag_name") else {
            continue;
        };
        let Some(value) = rows.get_str(row, "tag_value") else {
            continue;
        };
        tracing::info!("Ingesting tag {}={} for {}.{}", category, value, schema, table);
        tags.push(Tag {
            category: category.to_string(),
            value: value.to_string(),
        });
    }

    Ok(tags)
}
