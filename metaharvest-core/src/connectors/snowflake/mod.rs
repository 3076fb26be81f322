//! Snowflake source connector.
//!
//! Reference implementation of the relational extraction pattern: enumerate
//! databases, list tables per database in one round trip, then for each
//! table filter, introspect, enrich, and emit — isolating failures so one
//! bad object never aborts the run.
//!
//! # Module Structure
//! - `inspect`: catalog inspector with the Snowflake-specific overrides
//! - `sampling`: sample fetch with the quoted-identifier fallback
//! - `tags`: tag-reference queries
//! - `types`: Snowflake type text to unified type mapping

mod inspect;
mod sampling;
mod tags;
mod types;

pub use inspect::SnowflakeInspector;
pub use types::map_snowflake_type;

use super::SourceConnector;
use crate::config::{ConnectionSpec, RunConfig, RunOptions, SnowflakeConnection};
use crate::engine::SqlEngine;
use crate::error::{HarvestError, Result};
use crate::filter::FilterEngine;
use crate::models::{
    DatabaseContext, ExtractionRecord, TableDescriptor, TableKind,
};
use crate::profile::Profiler;
use crate::status::RunStatus;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::catalog::{CatalogInspector, TableEntry};

const SHOW_DATABASES: &str = "SHOW DATABASES";

/// Extraction progress: one variant per pipeline stage.
enum Phase {
    Init,
    Extracting {
        pending: VecDeque<String>,
        current: Option<DatabaseCursor>,
    },
    Done,
}

/// The active database scope with its rebound inspector and table queue.
struct DatabaseCursor {
    context: DatabaseContext,
    inspector: SnowflakeInspector,
    tables: VecDeque<TableEntry>,
}

/// Pull-based extractor over one Snowflake account.
pub struct SnowflakeConnector {
    service_name: String,
    connection: SnowflakeConnection,
    options: RunOptions,
    filter: FilterEngine,
    engine: Arc<dyn SqlEngine>,
    profiler: Option<Arc<dyn Profiler>>,
    status: RunStatus,
    phase: Phase,
}

impl SnowflakeConnector {
    /// Builds the connector from a resolved run configuration.
    ///
    /// # Errors
    /// [`HarvestError::InvalidSource`] if the validated connection is not a
    /// Snowflake connection. This is a configuration-time failure and is
    /// never retried.
    pub fn create(
        config: RunConfig,
        engine: Arc<dyn SqlEngine>,
        profiler: Option<Arc<dyn Profiler>>,
    ) -> Result<Self> {
        let RunConfig {
            source,
            filters,
            options,
        } = config;

        let connection = match source.service_connection.config {
            ConnectionSpec::Snowflake(connection) => connection,
            other => {
                return Err(HarvestError::InvalidSource {
                    expected: "SnowflakeConnection",
                    actual: format!("{}Connection", other.source_type()),
                });
            }
        };

        Ok(Self {
            service_name: source.service_name,
            connection,
            options,
            filter: FilterEngine::new(filters.include_patterns, filters.exclude_patterns),
            engine,
            profiler,
            status: RunStatus::new(),
            phase: Phase::Init,
        })
    }

    /// Databases to extract, in order.
    ///
    /// An explicit database in the connection short-circuits to the generic
    /// single-database path: the engine is already scoped, so no listing
    /// query and no switch are issued. Otherwise every database on the
    /// account is listed and each gets one switch.
    async fn enumerate_databases(&self) -> Result<VecDeque<String>> {
        if let Some(database) = &self.connection.database {
            return Ok(VecDeque::from([database.clone()]));
        }

        let rows = self
            .engine
            .fetch_all(SHOW_DATABASES)
            .await
            .map_err(|e| HarvestError::enumeration_failed("Failed to list databases", e))?;

        let index = rows.column_index("name").unwrap_or(1);
        let mut databases = VecDeque::new();
        for row in &rows.rows {
            if let Some(name) = row.get(index).and_then(serde_json::Value::as_str) {
                databases.push_back(name.to_string());
            }
        }

        tracing::info!("Discovered {} databases", databases.len());
        Ok(databases)
    }

    /// Switches the shared handle to `database` (when enumerating), rebinds
    /// the inspector to the fresh context, and lists its tables.
    async fn open_database(&self, database: &str) -> Result<DatabaseCursor> {
        if self.connection.database.is_none() {
            self.engine
                .execute(&format!("USE DATABASE {}", database))
                .await
                .map_err(|e| {
                    HarvestError::enumeration_failed(
                        format!("Failed to switch to database {}", database),
                        e,
                    )
                })?;
        }
        tracing::info!("Ingesting from database: {}", database);

        let context = DatabaseContext::new(database);
        let inspector = SnowflakeInspector::new(Arc::clone(&self.engine), context.clone());
        let tables = inspector.list_tables().await.map_err(|e| {
            HarvestError::enumeration_failed(
                format!("Failed to list tables in database {}", database),
                e,
            )
        })?;

        Ok(DatabaseCursor {
            context,
            inspector,
            tables: tables.into(),
        })
    }

    /// Assembles one table's record: introspection, then enrichments.
    ///
    /// Any error here is caught at the per-table boundary in `next_record`.
    async fn build_record(
        &self,
        cursor: &DatabaseCursor,
        entry: &TableEntry,
    ) -> Result<ExtractionRecord> {
        let inspector = &cursor.inspector;

        let columns = inspector
            .list_columns(&entry.schema, &entry.name)
            .await
            .map_err(|e| {
                HarvestError::extraction_failed(
                    format!(
                        "Failed to introspect columns for {}.{}",
                        entry.schema, entry.name
                    ),
                    e,
                )
            })?;
        let view_definition = inspector
            .view_definition(&entry.schema, &entry.name)
            .await?
            .unwrap_or_default();

        // Single-round-trip listings can omit comments; fall back to the
        // inspector's comment lookup when they do.
        let comment = match &entry.comment {
            Some(comment) if !comment.is_empty() => Some(comment.clone()),
            _ => inspector.table_comment(&entry.schema, &entry.name).await?,
        };

        let table = TableDescriptor {
            database: cursor.context.database.clone(),
            schema: entry.schema.clone(),
            name: entry.name.clone(),
            kind: entry.kind,
            comment,
            view_definition,
            columns,
        };

        let sample = if self.options.generate_sample_data {
            sampling::fetch_sample(
                self.engine.as_ref(),
                &self.options.sample_data_query,
                &entry.schema,
                &entry.name,
            )
            .await
        } else {
            None
        };

        // Tag failures propagate to the per-table boundary.
        let tags = tags::fetch_tags(
            self.engine.as_ref(),
            &cursor.context,
            &entry.schema,
            &entry.name,
            "table",
        )
        .await?;

        let profile = if self.options.enable_data_profiler {
            match &self.profiler {
                Some(profiler) => {
                    profiler
                        .profile(&cursor.context.database, &entry.schema, &entry.name)
                        .await?
                }
                None => None,
            }
        } else {
            None
        };

        Ok(ExtractionRecord {
            id: uuid::Uuid::new_v4(),
            service_name: self.service_name.clone(),
            database: cursor.context.database.clone(),
            schema: entry.schema.clone(),
            table,
            sample,
            tags,
            profile,
        })
    }
}

#[async_trait]
impl SourceConnector for SnowflakeConnector {
    fn source_type(&self) -> &'static str {
        "Snowflake"
    }

    async fn next_record(&mut self) -> Result<Option<ExtractionRecord>> {
        loop {
            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Init => {
                    let pending = self.enumerate_databases().await?;
                    self.phase = Phase::Extracting {
                        pending,
                        current: None,
                    };
                }
                Phase::Extracting {
                    mut pending,
                    current: None,
                } => match pending.pop_front() {
                    Some(database) => {
                        let cursor = self.open_database(&database).await?;
                        self.phase = Phase::Extracting {
                            pending,
                            current: Some(cursor),
                        };
                    }
                    None => {
                        return Ok(None);
                    }
                },
                Phase::Extracting {
                    pending,
                    current: Some(mut cursor),
                } => {
                    let Some(entry) = cursor.tables.pop_front() else {
                        self.phase = Phase::Extracting {
                            pending,
                            current: None,
                        };
                        continue;
                    };

                    let fqn = format!(
                        "{}.{}.{}.{}",
                        self.service_name, cursor.context.database, entry.schema, entry.name
                    );

                    if !self.filter.allowed(&entry.name) {
                        let kind = match entry.kind {
                            TableKind::Regular => "Table",
                            TableKind::View => "View",
                        };
                        self.status.filter(fqn, format!("{} pattern not allowed", kind));
                        self.phase = Phase::Extracting {
                            pending,
                            current: Some(cursor),
                        };
                        continue;
                    }

                    let result = self.build_record(&cursor, &entry).await;
                    self.phase = Phase::Extracting {
                        pending,
                        current: Some(cursor),
                    };

                    match result {
                        Ok(record) => {
                            self.status.register(fqn);
                            return Ok(Some(record));
                        }
                        Err(err) => {
                            tracing::debug!("Extraction failure for {}: {:?}", fqn, err);
                            tracing::error!("Failed to extract {}: {}", fqn, err);
                            self.status.failure(fqn);
                        }
                    }
                }
                Phase::Done => return Ok(None),
            }
        }
    }

    fn status(&self) -> &RunStatus {
        &self.status
    }
}
