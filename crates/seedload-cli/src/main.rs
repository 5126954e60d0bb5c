#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use clap::Parser;
use config::{CliArgs, LoadConfig};
use seedload::{Backend, MemoryStore, PgStore, ReportSink, Reporter, RunSummary, Scheduler};
use telemetry::init_tracing;

// Generation allocates one small string per field; mimalloc keeps that cheap.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = LoadConfig::try_from(args)?;

    init_tracing()?;
    log_startup_info(&config);

    let mut reporter = Reporter::new(ReportSink::new(config.report_path.clone()));
    let mut scheduler = Scheduler::new(config.options)?;

    let summary = match &config.backend {
        Backend::Postgres { url } => {
            let mut store = PgStore::connect(url).await?;
            let outcome = scheduler.run(&mut store, &mut reporter).await;
            if let Err(e) = store.close().await {
                tracing::warn!("Error closing connection: {e}");
            }
            outcome?
        }
        Backend::Memory => {
            let mut store = MemoryStore::new();
            scheduler.run(&mut store, &mut reporter).await?
        }
    };

    log_summary(&summary);
    Ok(())
}

fn log_startup_info(config: &LoadConfig) {
    tracing::info!(
        "Loading {} rows into {} (chunk={}, seed={}, anchor={})",
        config.options.rows,
        config.backend.name(),
        config.options.chunk,
        config.options.seed,
        config.options.anchor.to_rfc3339()
    );
}

fn log_summary(summary: &RunSummary) {
    if summary.report.is_none() {
        tracing::warn!("Loaded {} rows but the report was not written", summary.rows_loaded);
    } else {
        tracing::info!(
            "Loaded {} rows in {} batches",
            summary.rows_loaded,
            summary.batches
        );
    }
}
