//! SQL-over-REST engine for sources exposing a statement API.
//!
//! Speaks the Snowflake SQL API: one POST per statement, bearer-token auth,
//! JSON rowset responses. Session context (warehouse, role, active database)
//! is carried per request, so a `USE DATABASE` issued through
//! [`RestSqlEngine::execute`] updates the database sent with later
//! statements.
//!
//! Timeout policy belongs to the HTTP client, not the core pipeline.

use super::{QueryRows, SqlEngine};
use crate::config::{Secret, SnowflakeConnection};
use crate::error::{HarvestError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Mutex;

/// Wire shape of a statement submission.
#[derive(Debug, serde::Serialize)]
struct StatementRequest<'a> {
    statement: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    warehouse: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'a str>,
}

/// Wire shape of a statement response rowset.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementResponse {
    #[serde(default)]
    result_set_meta_data: Option<ResultSetMetaData>,
    #[serde(default)]
    data: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultSetMetaData {
    #[serde(default)]
    row_type: Vec<RowType>,
}

#[derive(Debug, Deserialize)]
struct RowType {
    name: String,
}

/// [`SqlEngine`] implementation over the Snowflake SQL REST API.
pub struct RestSqlEngine {
    client: reqwest::Client,
    endpoint: url::Url,
    token: Secret,
    warehouse: Option<String>,
    role: Option<String>,
    /// Active database, updated by `USE DATABASE` statements
    database: Mutex<Option<String>>,
}

impl RestSqlEngine {
    /// Builds an engine for an account locator, e.g. "xy12345".
    pub fn new(account: &str, token: Secret) -> Result<Self> {
        let endpoint = url::Url::parse(&format!(
            "https://{}.snowflakecomputing.com/api/v2/statements",
            account
        ))
        .map_err(|e| {
            HarvestError::configuration(format!("Invalid account locator {}: {}", account, e))
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            token,
            warehouse: None,
            role: None,
            database: Mutex::new(None),
        })
    }

    /// Builds an engine from a resolved Snowflake connection.
    pub fn from_connection(connection: &SnowflakeConnection) -> Result<Self> {
        let mut engine = Self::new(&connection.account, connection.password.clone())?;
        engine.warehouse = Some(connection.warehouse.clone());
        engine.role = connection.role.clone();
        *engine.database.lock().map_err(poisoned)? = connection.database.clone();
        Ok(engine)
    }

    async fn submit(&self, sql: &str) -> Result<QueryRows> {
        let database = self.database.lock().map_err(poisoned)?.clone();
        let request = StatementRequest {
            statement: sql,
            warehouse: self.warehouse.as_deref(),
            role: self.role.as_deref(),
            database: database.as_deref(),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.token.expose())
            .header("X-Snowflake-Authorization-Token-Type", "OAUTH")
            .json(&request)
            .send()
            .await
            .map_err(|e| HarvestError::query_failed("Statement submission failed", e))?
            .error_for_status()
            .map_err(|e| HarvestError::query_failed("Statement rejected by the server", e))?;

        let body: StatementResponse = response
            .json()
            .await
            .map_err(|e| HarvestError::query_failed("Failed to decode statement response", e))?;

        let columns = body
            .result_set_meta_data
            .map(|meta| meta.row_type.into_iter().map(|c| c.name).collect())
            .unwrap_or_default();

        Ok(QueryRows {
            columns,
            rows: body.data,
        })
    }

    /// Tracks `USE DATABASE` statements so later requests carry the new
    /// context, mirroring a session-scoped connection.
    fn track_context(&self, sql: &str) -> Result<()> {
        let mut parts = sql.split_whitespace();
        let is_use = parts.next().is_some_and(|t| t.eq_ignore_ascii_case("use"));
        let is_database = parts
            .next()
            .is_some_and(|t| t.eq_ignore_ascii_case("database"));
        if is_use && is_database {
            if let Some(name) = parts.next() {
                *self.database.lock().map_err(poisoned)? = Some(name.to_string());
            }
        }
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> HarvestError {
    HarvestError::configuration("Engine context lock poisoned")
}

#[async_trait]
impl SqlEngine for RestSqlEngine {
    async fn fetch_all(&self, sql: &str) -> Result<QueryRows> {
        self.submit(sql).await
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        self.submit(sql).await?;
        self.track_context(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_account() {
        let engine = RestSqlEngine::new("xy12345", Secret::new("tok")).unwrap();
        assert_eq!(
            engine.endpoint.as_str(),
            "https://xy12345.snowflakecomputing.com/api/v2/statements"
        );
    }

    #[test]
    fn test_invalid_account_rejected() {
        assert!(RestSqlEngine::new("bad host", Secret::new("tok")).is_err());
    }

    #[test]
    fn test_context_tracking() {
        let engine = RestSqlEngine::new("xy12345", Secret::new("tok")).unwrap();
        engine.track_context("USE DATABASE ANALYTICS").unwrap();
        assert_eq!(
            engine.database.lock().unwrap().as_deref(),
            Some("ANALYTICS")
        );

        // Non-context statements leave the scope alone.
        engine.track_context("select 1").unwrap();
        assert_eq!(
            engine.database.lock().unwrap().as_deref(),
            Some("ANALYTICS")
        );
    }
}
