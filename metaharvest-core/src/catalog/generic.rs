//! information_schema-based default implementations.
//!
//! These work against any engine exposing an ANSI information_schema and are
//! the delegation targets for concrete inspectors. Identifier and literal
//! values are escaped inline because catalog queries run over the plain
//! statement channel.

use crate::Result;
use crate::engine::{QueryRows, SqlEngine, quote_literal};
use crate::models::{ColumnDescriptor, ColumnType};

/// Lists the columns of one table from information_schema.columns.
///
/// `map_type` converts the source's raw type text into the unified type;
/// each source registers its own mapping.
pub async fn list_columns(
    engine: &dyn SqlEngine,
    schema: &str,
    table: &str,
    map_type: fn(&str) -> ColumnType,
) -> Result<Vec<ColumnDescriptor>> {
    let query = format!(
        "select column_name, data_type, is_nullable, column_default, ordinal_position, comment \
         from information_schema.columns \
         where table_schema = '{}' and table_name = '{}' \
         order by ordinal_position",
        quote_literal(schema),
        quote_literal(table)
    );

    let rows = engine.fetch_all(&query).await?;

    let mut columns = Vec::with_capacity(rows.rows.len());
    for (position, row) in rows.rows.iter().enumerate() {
        let name = rows
            .get_str(row, "column_name")
            .unwrap_or_default()
            .to_string();
        let raw_type = rows
            .get_str(row, "data_type")
            .unwrap_or_default()
            .to_string();
        let is_nullable = rows
            .get_str(row, "is_nullable")
            .is_some_and(|v| v.eq_ignore_ascii_case("yes"));
        let default_value = rows.get_str(row, "column_default").map(str::to_string);
        let comment = rows
            .get_str(row, "comment")
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        let ordinal_position = cell_u32(&rows, row, "ordinal_position")
            .unwrap_or(position as u32 + 1);

        columns.push(ColumnDescriptor {
            data_type: map_type(&raw_type),
            name,
            raw_type,
            is_nullable,
            is_unique: false,
            default_value,
            comment,
            ordinal_position,
        });
    }

    Ok(columns)
}

/// View definition text from information_schema.views.
pub async fn view_definition(
    engine: &dyn SqlEngine,
    schema: &str,
    table: &str,
) -> Result<Option<String>> {
    let query = format!(
        "select view_definition from information_schema.views \
         where table_schema = '{}' and table_name = '{}'",
        quote_literal(schema),
        quote_literal(table)
    );

    let rows = engine.fetch_all(&query).await?;
    Ok(rows
        .rows
        .first()
        .and_then(|row| rows.get_str(row, "view_definition"))
        .map(str::to_string))
}

/// Table comment from information_schema.tables, exact-case match.
pub async fn table_comment(
    engine: &dyn SqlEngine,
    schema: &str,
    table: &str,
) -> Result<Option<String>> {
    let query = format!(
        "select comment from information_schema.tables \
         where table_schema = '{}' and table_name = '{}'",
        quote_literal(schema),
        quote_literal(table)
    );

    let rows = engine.fetch_all(&query).await?;
    Ok(rows
        .rows
        .first()
        .and_then(|row| rows.get_str(row, "comment"))
        .filter(|c| !c.is_empty())
        .map(str::to_string))
}

/// Numeric cell that may arrive as a JSON number or a string.
fn cell_u32(rows: &QueryRows, row: &[serde_json::Value], name: &str) -> Option<u32> {
    let idx = rows.column_index(name)?;
    match row.get(idx)? {
        serde_json::Value::Number(n) => n.as_u64().map(|v| v as u32),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_u32_accepts_both_wire_forms() {
        let rows = QueryRows {
            columns: vec!["ordinal_position".to_string()],
            rows: vec![
                vec![serde_json::json!(3)],
                vec![serde_json::json!("7")],
                vec![serde_json::Value::Null],
            ],
        };
        assert_eq!(cell_u32(&rows, &rows.rows[0], "ordinal_position"), Some(3));
        assert_eq!(cell_u32(&rows, &rows.rows[1], "ordinal_position"), Some(7));
        assert_eq!(cell_u32(&rows, &rows.rows[2], "ordinal_position"), None);
    }
}
