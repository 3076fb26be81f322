//! Run-configuration document types and resolution.
//!
//! A run configuration is a declarative document naming a source type, its
//! connection parameters, filter patterns, and feature toggles. The document
//! is validated against the discriminated connection-schema union by the
//! [`resolver`]; the [`registry`] maps source-type tags to categories and
//! concrete schemas.
//!
//! # Module Structure
//! - `connections`: concrete connection schemas and their tagged union
//! - `registry`: service categories and the compile-time connection registry
//! - `resolver`: full-union validation with the scoped-diagnostic fallback

mod connections;
pub mod registry;
pub mod resolver;

pub use connections::{
    AmundsenConnection, AtlasConnection, BigQueryConnection, ConnectionSpec, KafkaConnection,
    LookerConnection, MetabaseConnection, MysqlConnection, PostgresConnection, PulsarConnection,
    RedshiftConnection, Secret, SnowflakeConnection, SupersetConnection,
};
pub use registry::{ServiceCategory, classify, locate};
pub use resolver::resolve;

use serde::{Deserialize, Serialize};

/// Default sample query template; the two placeholders are schema and table.
pub const DEFAULT_SAMPLE_QUERY: &str = "select * from {}.{} limit 50";

/// The full declarative input for one harvesting run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub source: SourceBlock,
    #[serde(default)]
    pub filters: FilterPatterns,
    #[serde(default)]
    pub options: RunOptions,
}

/// The source half of a run configuration: type tag, service name, and the
/// nested connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBlock {
    /// Source type tag, e.g. "Snowflake"
    #[serde(rename = "type")]
    pub source_type: String,
    /// Name the harvested entities are registered under
    pub service_name: String,
    pub service_connection: ServiceConnection,
}

/// Wrapper for the typed connection block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConnection {
    pub config: ConnectionSpec,
}

/// Include/exclude glob patterns applied to discovered table names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterPatterns {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

/// Feature toggles for the extraction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunOptions {
    /// Collect sample rows for each emitted table
    pub generate_sample_data: bool,
    /// Delegate to the profiler collaborator for each emitted table
    pub enable_data_profiler: bool,
    /// Sample query template with schema and table placeholders
    pub sample_data_query: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            generate_sample_data: false,
            enable_data_profiler: false,
            sample_data_query: DEFAULT_SAMPLE_QUERY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document_parses() {
        let doc = serde_json::json!({
            "source": {
                "type": "Snowflake",
                "serviceName": "snow_prod",
                "serviceConnection": {
                    "config": {
                        "type": "Snowflake",
                        "account": "xy12345",
                        "username": "harvester",
                        "password": "secret",
                        "warehouse": "COMPUTE_WH"
                    }
                }
            }
        });

        let config: RunConfig = serde_json::from_value(doc).unwrap();
        assert_eq!(config.source.source_type, "Snowflake");
        assert_eq!(config.source.service_name, "snow_prod");
        assert!(config.filters.include_patterns.is_empty());
        assert!(!config.options.generate_sample_data);
        assert_eq!(config.options.sample_data_query, DEFAULT_SAMPLE_QUERY);
    }

    #[test]
    fn test_options_and_filters_parse() {
        let doc = serde_json::json!({
            "source": {
                "type": "Postgres",
                "serviceName": "pg_local",
                "serviceConnection": {
                    "config": {
                        "type": "Postgres",
                        "hostPort": "localhost:5432",
                        "username": "admin",
                        "password": "pw"
                    }
                }
            },
            "filters": {
                "includePatterns": ["orders*"],
                "excludePatterns": ["tmp_*"]
            },
            "options": {
                "generateSampleData": true,
                "enableDataProfiler": true
            }
        });

        let config: RunConfig = serde_json::from_value(doc).unwrap();
        assert_eq!(config.filters.include_patterns, vec!["orders*"]);
        assert!(config.options.generate_sample_data);
        assert!(config.options.enable_data_profiler);
    }
}
