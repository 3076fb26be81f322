//! Profiler collaborator seam.
//!
//! Profiling is optional per run and external to the extraction pipeline:
//! the connector delegates here when enabled and attaches whatever comes
//! back. A profiler returning `Ok(None)` means "nothing to attach" and never
//! blocks record emission.

use crate::Result;
use crate::engine::SqlEngine;
use crate::models::Profile;
use async_trait::async_trait;
use std::sync::Arc;

/// Computes statistics for one table.
#[async_trait]
pub trait Profiler: Send + Sync {
    /// Profiles a table; `Ok(None)` when no profile could be produced.
    async fn profile(&self, database: &str, schema: &str, table: &str)
    -> Result<Option<Profile>>;
}

/// Profiler that never produces a profile. Useful for wiring and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProfiler;

#[async_trait]
impl Profiler for NoopProfiler {
    async fn profile(&self, _: &str, _: &str, _: &str) -> Result<Option<Profile>> {
        Ok(None)
    }
}

/// Minimal engine-backed profiler: one row count per table.
pub struct RowCountProfiler {
    engine: Arc<dyn SqlEngine>,
}

impl RowCountProfiler {
    pub fn new(engine: Arc<dyn SqlEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Profiler for RowCountProfiler {
    async fn profile(
        &self,
        database: &str,
        schema: &str,
        table: &str,
    ) -> Result<Option<Profile>> {
        let query = format!("select count(*) from {}.{}.{}", database, schema, table);
        let rows = self.engine.fetch_all(&query).await?;

        let row_count = rows.rows.first().and_then(|row| match row.first() {
            Some(serde_json::Value::Number(n)) => n.as_u64(),
            Some(serde_json::Value::String(s)) => s.parse().ok(),
            _ => None,
        });

        if row_count.is_none() {
            return Ok(None);
        }

        Ok(Some(Profile {
            profiled_at: chrono::Utc::now(),
            row_count,
            column_count: None,
        }))
    }
}
