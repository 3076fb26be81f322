//! Metadata collection tool.
//!
//! This binary loads a declarative run configuration, resolves it against
//! the registered connection schemas, and drives the source extraction
//! pipeline to completion, writing one JSON record per emitted table.
//!
//! Fatal configuration errors abort with a message naming the offending
//! type or schema; per-table failures are logged by the connector and
//! reflected in the run summary.

use anyhow::Context;
use clap::Parser;
use metaharvest_core::config::ConnectionSpec;
use metaharvest_core::profile::{Profiler, RowCountProfiler};
use metaharvest_core::{RestSqlEngine, SqlEngine, create_connector, init_logging, resolve};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "metaharvest-collect")]
#[command(about = "Metadata harvesting collector")]
#[command(version)]
#[command(long_about = "
Metaharvest Collector - declarative metadata extraction

Loads a run configuration (JSON or YAML) naming a source type, validates it
against the type's connection schema, and extracts structural metadata:
databases, schemas, tables, columns, and optional sample rows, tags, and
profiles. One JSON record is written per emitted table.

EXAMPLES:
  metaharvest-collect run.yaml
  metaharvest-collect --output records.jsonl run.json
  metaharvest-collect --dry-run run.yaml
")]
pub struct Cli {
    /// Run configuration file (.json, .yaml, or .yml)
    pub config: PathBuf,

    /// Output file for extraction records (defaults to stdout)
    #[arg(short, long, help = "Write records as JSON lines to this path")]
    pub output: Option<PathBuf>,

    /// Resolve and validate the configuration without extracting
    #[arg(long, help = "Validate the run configuration and exit")]
    pub dry_run: bool,

    /// Increase log verbosity (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only show errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose, cli.quiet)?;

    let raw = load_document(&cli.config)?;
    let config = resolve(&raw)?;

    info!(
        "Resolved {} run configuration for service '{}'",
        config.source.source_type, config.source.service_name
    );

    if cli.dry_run {
        println!(
            "Configuration valid: {} source '{}'",
            config.source.source_type, config.source.service_name
        );
        return Ok(());
    }

    let engine: Arc<dyn SqlEngine> = match &config.source.service_connection.config {
        ConnectionSpec::Snowflake(connection) => {
            Arc::new(RestSqlEngine::from_connection(connection)?)
        }
        other => anyhow::bail!("No engine available for {} sources", other.source_type()),
    };

    let profiler: Option<Arc<dyn Profiler>> = if config.options.enable_data_profiler {
        Some(Arc::new(RowCountProfiler::new(Arc::clone(&engine))))
    } else {
        None
    };

    let mut connector = create_connector(config, engine, profiler)?;

    let mut sink: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(std::io::BufWriter::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    while let Some(record) = connector.next_record().await? {
        serde_json::to_writer(&mut sink, &record)
            .context("Failed to serialize extraction record")?;
        sink.write_all(b"\n")?;
    }
    sink.flush()?;

    let summary = connector.status().summary();
    info!("Run complete: {}", summary);

    Ok(())
}

/// Loads a configuration document, choosing the parser by file extension.
fn load_document(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid YAML in {}", path.display()))
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON in {}", path.display()))
    }
}
