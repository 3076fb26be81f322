//! Service categories and the compile-time connection registry.
//!
//! A source-type tag belongs to exactly one service category and resolves to
//! exactly one connection schema. Both lookups are static tables populated at
//! compile time, so the supported-type set is enumerable without any runtime
//! path construction.

use super::connections::{
    AmundsenConnection, AtlasConnection, BigQueryConnection, ConnectionSpec, KafkaConnection,
    LookerConnection, MetabaseConnection, MysqlConnection, PostgresConnection, PulsarConnection,
    RedshiftConnection, SnowflakeConnection, SupersetConnection,
};
use crate::error::{HarvestError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Top-level kind of service a source belongs to. Fixed, closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceCategory {
    Database,
    Dashboard,
    Messaging,
    Metadata,
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Database => "Database",
            Self::Dashboard => "Dashboard",
            Self::Messaging => "Messaging",
            Self::Metadata => "Metadata",
        };
        f.write_str(name)
    }
}

/// Source-type tags per category. A tag appears in exactly one list.
pub const DATABASE_SERVICES: &[&str] =
    &["Snowflake", "Postgres", "Mysql", "Redshift", "BigQuery"];
pub const DASHBOARD_SERVICES: &[&str] = &["Looker", "Metabase", "Superset"];
pub const MESSAGING_SERVICES: &[&str] = &["Kafka", "Pulsar"];
pub const METADATA_SERVICES: &[&str] = &["Amundsen", "Atlas"];

/// Returns the service category for a source-type tag.
///
/// The four category lists are checked in a fixed order (Database, Dashboard,
/// Messaging, Metadata) and the first containing the tag wins.
///
/// # Errors
/// [`HarvestError::UnknownSourceType`] if no list contains the tag.
pub fn classify(source_type: &str) -> Result<ServiceCategory> {
    if DATABASE_SERVICES.contains(&source_type) {
        return Ok(ServiceCategory::Database);
    }
    if DASHBOARD_SERVICES.contains(&source_type) {
        return Ok(ServiceCategory::Dashboard);
    }
    if MESSAGING_SERVICES.contains(&source_type) {
        return Ok(ServiceCategory::Messaging);
    }
    if METADATA_SERVICES.contains(&source_type) {
        return Ok(ServiceCategory::Metadata);
    }

    Err(HarvestError::UnknownSourceType {
        source_type: source_type.to_string(),
    })
}

/// One registered source type: its tag, category, and a parser that narrows
/// a raw connection block to the concrete schema.
pub struct ConnectionEntry {
    pub tag: &'static str,
    pub category: ServiceCategory,
    narrow: fn(serde_json::Value) -> serde_json::Result<ConnectionSpec>,
}

impl ConnectionEntry {
    /// Validates a raw connection block against this entry's concrete schema.
    ///
    /// An extra `type` discriminator field in the block is tolerated; the
    /// entry was located by that same field.
    pub fn parse_connection(&self, block: serde_json::Value) -> serde_json::Result<ConnectionSpec> {
        (self.narrow)(block)
    }
}

impl std::fmt::Debug for ConnectionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionEntry")
            .field("tag", &self.tag)
            .field("category", &self.category)
            .finish()
    }
}

fn narrow<T>(block: serde_json::Value) -> serde_json::Result<ConnectionSpec>
where
    T: DeserializeOwned + Into<ConnectionSpec>,
{
    // Drop the discriminator before parsing the bare struct; the concrete
    // schemas do not carry their own tag field.
    let block = match block {
        serde_json::Value::Object(mut map) => {
            map.remove("type");
            serde_json::Value::Object(map)
        }
        other => other,
    };
    serde_json::from_value::<T>(block).map(Into::into)
}

/// The full set of registered source types.
static CONNECTION_REGISTRY: &[ConnectionEntry] = &[
    ConnectionEntry {
        tag: "Snowflake",
        category: ServiceCategory::Database,
        narrow: narrow::<SnowflakeConnection>,
    },
    ConnectionEntry {
        tag: "Postgres",
        category: ServiceCategory::Database,
        narrow: narrow::<PostgresConnection>,
    },
    ConnectionEntry {
        tag: "Mysql",
        category: ServiceCategory::Database,
        narrow: narrow::<MysqlConnection>,
    },
    ConnectionEntry {
        tag: "Redshift",
        category: ServiceCategory::Database,
        narrow: narrow::<RedshiftConnection>,
    },
    ConnectionEntry {
        tag: "BigQuery",
        category: ServiceCategory::Database,
        narrow: narrow::<BigQueryConnection>,
    },
    ConnectionEntry {
        tag: "Looker",
        category: ServiceCategory::Dashboard,
        narrow: narrow::<LookerConnection>,
    },
    ConnectionEntry {
        tag: "Metabase",
        category: ServiceCategory::Dashboard,
        narrow: narrow::<MetabaseConnection>,
    },
    ConnectionEntry {
        tag: "Superset",
        category: ServiceCategory::Dashboard,
        narrow: narrow::<SupersetConnection>,
    },
    ConnectionEntry {
        tag: "Kafka",
        category: ServiceCategory::Messaging,
        narrow: narrow::<KafkaConnection>,
    },
    ConnectionEntry {
        tag: "Pulsar",
        category: ServiceCategory::Messaging,
        narrow: narrow::<PulsarConnection>,
    },
    ConnectionEntry {
        tag: "Amundsen",
        category: ServiceCategory::Metadata,
        narrow: narrow::<AmundsenConnection>,
    },
    ConnectionEntry {
        tag: "Atlas",
        category: ServiceCategory::Metadata,
        narrow: narrow::<AtlasConnection>,
    },
];

/// Returns the registered connection entry for a tag and category.
///
/// # Errors
/// [`HarvestError::ConnectionSchemaNotFound`] if the tag has no entry or the
/// entry's category disagrees with the caller's.
pub fn locate(source_type: &str, category: ServiceCategory) -> Result<&'static ConnectionEntry> {
    CONNECTION_REGISTRY
        .iter()
        .find(|entry| entry.tag == source_type && entry.category == category)
        .ok_or_else(|| HarvestError::ConnectionSchemaNotFound {
            source_type: source_type.to_string(),
            category: category.to_string(),
        })
}
