//! Data models for harvested metadata.
//!
//! These types describe what the extraction pipeline discovers: tables,
//! columns, sample rows, tags, and profiles, bundled per table into an
//! [`ExtractionRecord`] for the downstream registry sink. Everything is
//! serializable so records can be shipped or written to disk as-is.

use serde::{Deserialize, Serialize};

/// Kind of a discovered catalog object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableKind {
    /// Regular base table
    Regular,
    /// View backed by a definition query
    View,
}

/// Unified column data type across source engines.
///
/// Source-specific type text is preserved separately on the column; this enum
/// is the normalized form downstream consumers switch on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnType {
    /// String/text types with optional length
    String { max_length: Option<u32> },
    /// Fixed-point numeric with optional precision/scale
    Number {
        precision: Option<u8>,
        scale: Option<u8>,
    },
    /// Floating point types
    Float,
    /// Boolean type
    Boolean,
    /// Date and time types
    DateTime { with_timezone: bool },
    /// Date only
    Date,
    /// Time only
    Time,
    /// Binary data
    Binary,
    /// Semi-structured document type (e.g. Snowflake VARIANT)
    Variant,
    /// Array of semi-structured values
    Array,
    /// Key-value object type
    Object,
    /// Geospatial type (e.g. Snowflake GEOGRAPHY)
    Geography,
    /// Custom/source-specific types
    Custom { type_name: String },
}

/// One column of a discovered table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub name: String,
    /// Raw type text as reported by the source catalog
    pub raw_type: String,
    pub data_type: ColumnType,
    pub is_nullable: bool,
    /// Member of at least one unique constraint
    pub is_unique: bool,
    pub default_value: Option<String>,
    pub comment: Option<String>,
    pub ordinal_position: u32,
}

/// A discovered table or view, with its columns.
///
/// `view_definition` is always present: the definition text for views, the
/// empty string for base tables or views whose definition is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptor {
    pub database: String,
    pub schema: String,
    pub name: String,
    pub kind: TableKind,
    pub comment: Option<String>,
    pub view_definition: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    /// Fully qualified name within a named service.
    pub fn fully_qualified_name(&self, service_name: &str) -> String {
        format!(
            "{}.{}.{}.{}",
            service_name, self.database, self.schema, self.name
        )
    }
}

/// Sampled rows for one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// A (category, value) tag pair attached to a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub category: String,
    pub value: String,
}

/// Computed statistics for one table, produced by a profiler collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub profiled_at: chrono::DateTime<chrono::Utc>,
    pub row_count: Option<u64>,
    pub column_count: Option<u32>,
}

/// The active catalog scope for a connector run.
///
/// A fresh value is created each time the pipeline switches catalogs and is
/// threaded through enumeration and query calls; it does not outlive the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseContext {
    pub database: String,
}

impl DatabaseContext {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
        }
    }
}

/// The unit of pipeline output: one table plus its enrichments.
///
/// Records are only emitted for tables that passed filtering; absent
/// enrichments degrade to `None`/empty rather than blocking emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRecord {
    pub id: uuid::Uuid,
    pub service_name: String,
    pub database: String,
    pub schema: String,
    pub table: TableDescriptor,
    pub sample: Option<SampleData>,
    pub tags: Vec<Tag>,
    pub profile: Option<Profile>,
}

impl ExtractionRecord {
    /// Fully qualified name of the record's table.
    pub fn fully_qualified_name(&self) -> String {
        self.table.fully_qualified_name(&self.service_name)
    }
}
