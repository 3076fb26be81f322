//! Concrete connection schemas and their discriminated union.
//!
//! Every registered source type ships one connection struct here and one
//! variant in [`ConnectionSpec`]. The union is internally tagged on `type`,
//! so a connection block's discriminator always equals its source-type tag.
//!
//! # Security
//! Credential fields use [`Secret`], which never exposes its value through
//! `Debug`, `Display`, or serialization.

use serde::{Deserialize, Serialize};

/// A credential value that is write-only from the outside world.
///
/// Deserializes transparently from a plain string; serializes and debugs as
/// `****`. The raw value is only reachable through [`Secret::expose`].
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the underlying credential. Callers must not log the result.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("****")
    }
}

impl Serialize for Secret {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("****")
    }
}

/// Snowflake connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnowflakeConnection {
    /// Account locator, e.g. "xy12345" or "xy12345.eu-west-1"
    pub account: String,
    pub username: String,
    pub password: Secret,
    pub warehouse: String,
    /// Explicit database; when absent the connector enumerates all databases
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl std::fmt::Display for SnowflakeConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SnowflakeConnection({}{})",
            self.account,
            self.database
                .as_ref()
                .map_or_else(String::new, |db| format!("/{}", db))
        )
        // Intentionally omit username and never include credentials
    }
}

/// PostgreSQL connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresConnection {
    pub host_port: String,
    pub username: String,
    pub password: Secret,
    #[serde(default)]
    pub database: Option<String>,
}

/// MySQL connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MysqlConnection {
    pub host_port: String,
    pub username: String,
    pub password: Secret,
    #[serde(default)]
    pub database_schema: Option<String>,
}

/// Amazon Redshift connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedshiftConnection {
    pub host_port: String,
    pub username: String,
    pub password: Secret,
    #[serde(default)]
    pub database: Option<String>,
}

/// Google BigQuery connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BigQueryConnection {
    pub project_id: String,
    pub credentials: Secret,
    #[serde(default)]
    pub dataset: Option<String>,
}

/// Looker connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookerConnection {
    pub host_port: String,
    pub client_id: String,
    pub client_secret: Secret,
}

/// Metabase connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetabaseConnection {
    pub host_port: String,
    pub username: String,
    pub password: Secret,
}

/// Superset connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupersetConnection {
    pub host_port: String,
    pub username: String,
    pub password: Secret,
}

/// Kafka connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaConnection {
    pub bootstrap_servers: String,
    #[serde(default)]
    pub schema_registry_url: Option<String>,
}

/// Pulsar connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulsarConnection {
    pub host_port: String,
}

/// Amundsen connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmundsenConnection {
    pub host_port: String,
    pub username: String,
    pub password: Secret,
}

/// Apache Atlas connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasConnection {
    pub host_port: String,
    pub username: String,
    pub password: Secret,
}

/// The discriminated union of all registered connection schemas.
///
/// Internally tagged on `type`: the wire form of each variant carries a
/// `type` field equal to its source-type tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConnectionSpec {
    Snowflake(SnowflakeConnection),
    Postgres(PostgresConnection),
    Mysql(MysqlConnection),
    Redshift(RedshiftConnection),
    BigQuery(BigQueryConnection),
    Looker(LookerConnection),
    Metabase(MetabaseConnection),
    Superset(SupersetConnection),
    Kafka(KafkaConnection),
    Pulsar(PulsarConnection),
    Amundsen(AmundsenConnection),
    Atlas(AtlasConnection),
}

impl ConnectionSpec {
    /// The source-type tag this connection belongs to (its discriminator).
    pub fn source_type(&self) -> &'static str {
        match self {
            Self::Snowflake(_) => "Snowflake",
            Self::Postgres(_) => "Postgres",
            Self::Mysql(_) => "Mysql",
            Self::Redshift(_) => "Redshift",
            Self::BigQuery(_) => "BigQuery",
            Self::Looker(_) => "Looker",
            Self::Metabase(_) => "Metabase",
            Self::Superset(_) => "Superset",
            Self::Kafka(_) => "Kafka",
            Self::Pulsar(_) => "Pulsar",
            Self::Amundsen(_) => "Amundsen",
            Self::Atlas(_) => "Atlas",
        }
    }
}

macro_rules! impl_from_connection {
    ($($conn:ident => $variant:ident),* $(,)?) => {
        $(impl From<$conn> for ConnectionSpec {
            fn from(value: $conn) -> Self {
                Self::$variant(value)
            }
        })*
    };
}

impl_from_connection! {
    SnowflakeConnection => Snowflake,
    PostgresConnection => Postgres,
    MysqlConnection => Mysql,
    RedshiftConnection => Redshift,
    BigQueryConnection => BigQuery,
    LookerConnection => Looker,
    MetabaseConnection => Metabase,
    SupersetConnection => Superset,
    KafkaConnection => Kafka,
    PulsarConnection => Pulsar,
    AmundsenConnection => Amundsen,
    AtlasConnection => Atlas,
}
