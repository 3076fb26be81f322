//! Core library for metaharvest.
//!
//! This crate provides the two tightly coupled pieces of the harvesting
//! system: configuration resolution (validating a declarative run
//! configuration against a type-specific connection schema, with a scoped
//! diagnostic fallback) and the source extraction pipeline (database
//! enumeration, table filtering, column introspection, and optional
//! sample/tag/profile enrichment, with per-table failure isolation).
//!
//! # Architecture
//! - Compile-time registry for source types and connection schemas
//! - Capability-set inspector seam over a shared SQL engine handle
//! - Pull-based connectors: every `next_record` return is a cancellation
//!   checkpoint
//!
//! # Security Guarantees
//! - No credentials stored or logged in any data structures
//! - All catalog operations are read-only

pub mod catalog;
pub mod config;
pub mod connectors;
pub mod engine;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod profile;
pub mod status;

// Re-export commonly used types
pub use config::{ConnectionSpec, RunConfig, ServiceCategory, classify, locate, resolve};
pub use connectors::{SnowflakeConnector, SourceConnector, create_connector, record_stream};
pub use engine::{QueryRows, SqlEngine};
pub use error::{HarvestError, Result};
pub use logging::init_logging;
pub use models::{
    ColumnDescriptor, ColumnType, DatabaseContext, ExtractionRecord, Profile, SampleData, Tag,
    TableDescriptor, TableKind,
};
pub use profile::{NoopProfiler, Profiler};
pub use status::{RunStatus, RunSummary};

#[cfg(feature = "rest-engine")]
pub use engine::RestSqlEngine;
