//! Source connector contract and factory.
//!
//! A connector is a pull-based, forward-only sequence of extraction records:
//! the orchestrator calls [`SourceConnector::next_record`] until it returns
//! `Ok(None)`. Every return is a cancellation checkpoint — stopping between
//! calls leaves nothing half-acquired, because context switches and table
//! processing are fully synchronous, non-overlapping steps. Runs are not
//! resumable mid-stream; restarting means re-running from the start.

use crate::Result;
use crate::config::RunConfig;
use crate::engine::SqlEngine;
use crate::error::HarvestError;
use crate::models::ExtractionRecord;
use crate::profile::Profiler;
use crate::status::RunStatus;
use async_trait::async_trait;
use std::sync::Arc;

pub mod snowflake;

pub use snowflake::SnowflakeConnector;

/// Generic contract every relational source connector satisfies.
///
/// `&mut self` on the pull method enforces the single-consumer assumption:
/// the shared engine handle's active context is mutated by database switches,
/// so interleaved consumption by multiple callers is prevented by the type
/// system rather than internal locking.
#[async_trait]
pub trait SourceConnector: Send {
    /// The source-type tag this connector handles.
    fn source_type(&self) -> &'static str;

    /// Pulls the next extraction record, or `Ok(None)` when the run is done.
    ///
    /// Fatal enumeration errors surface here; per-table failures are
    /// recovered internally and reflected in [`SourceConnector::status`].
    async fn next_record(&mut self) -> Result<Option<ExtractionRecord>>;

    /// Run-scoped status tracker (registered / filtered / failed).
    fn status(&self) -> &RunStatus;
}

/// Adapts a connector into a stream of records for callers that prefer
/// combinators over the explicit pull loop.
///
/// The stream ends after the connector's `Ok(None)` or after yielding one
/// fatal error; the connector is consumed either way, so read the run
/// status before wrapping when you need the summary.
pub fn record_stream(
    connector: Box<dyn SourceConnector>,
) -> impl futures::Stream<Item = Result<ExtractionRecord>> {
    futures::stream::unfold(Some(connector), |state| async move {
        let mut connector = state?;
        match connector.next_record().await {
            Ok(Some(record)) => Some((Ok(record), Some(connector))),
            Ok(None) => None,
            Err(e) => Some((Err(e), None)),
        }
    })
}

/// Builds the connector for a resolved run configuration.
///
/// Dispatches on the source-type tag; tags that are registered but have no
/// connector implementation are reported as configuration errors.
pub fn create_connector(
    config: RunConfig,
    engine: Arc<dyn SqlEngine>,
    profiler: Option<Arc<dyn Profiler>>,
) -> Result<Box<dyn SourceConnector>> {
    match config.source.source_type.as_str() {
        "Snowflake" => Ok(Box::new(SnowflakeConnector::create(
            config, engine, profiler,
        )?)),
        other => Err(HarvestError::configuration(format!(
            "No connector implemented for {} sources",
            other
        ))),
    }
}
