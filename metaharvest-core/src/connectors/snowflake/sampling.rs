//! Sample data fetch with the quoted-identifier fallback.
//!
//! Snowflake folds unquoted identifiers to uppercase, so a plain-identifier
//! sample query fails (or finds nothing) for tables created with irregular
//! case. The second attempt quotes the table name for an exact-case match.
//! Sampling never fails a table: both attempts exhausted means no sample.

use crate::engine::{SqlEngine, quote_ident};
use crate::error::Result;
use crate::models::SampleData;

/// Fetches sample rows for one table, or `None` when both attempts fail.
pub(crate) async fn fetch_sample(
    engine: &dyn SqlEngine,
    template: &str,
    schema: &str,
    table: &str,
) -> Option<SampleData> {
    match run_sample(engine, template, schema, table).await {
        Ok(Some(sample)) => return Some(sample),
        Ok(None) => {
            tracing::debug!("Sample query for {}.{} returned no rows", schema, table);
        }
        Err(err) => {
            tracing::debug!("Sample query for {}.{} failed: {}", schema, table, err);
        }
    }

    tracing::info!("Using table name with quotes to fetch the data");
    match run_sample(engine, template, schema, &quote_ident(table)).await {
        Ok(Some(sample)) => Some(sample),
        Ok(None) => {
            tracing::error!("No sample rows for {}.{} on either attempt", schema, table);
            None
        }
        Err(err) => {
            tracing::error!("{}", err);
            None
        }
    }
}

async fn run_sample(
    engine: &dyn SqlEngine,
    template: &str,
    schema: &str,
    table: &str,
) -> Result<Option<SampleData>> {
    let query = render_sample_query(template, schema, table);
    tracing::debug!("{}", query);

    let rows = engine.fetch_all(&query).await?;
    if rows.is_empty() {
        return Ok(None);
    }

    Ok(Some(SampleData {
        columns: rows.columns,
        rows: rows.rows,
    }))
}

/// Substitutes schema and table into the two `{}` placeholders of the
/// configured sample query template.
fn render_sample_query(template: &str, schema: &str, table: &str) -> String {
    let mut result = String::with_capacity(template.len() + schema.len() + table.len());
    let mut rest = template;
    for value in [schema, table] {
        match rest.split_once("{}") {
            Some((head, tail)) => {
                result.push_str(head);
                result.push_str(value);
                rest = tail;
            }
            None => break,
        }
    }
    result.push_str(rest);
    result
}
