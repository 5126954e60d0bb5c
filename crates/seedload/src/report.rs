//! Benchmark timing, per-batch progress, and the persisted run summary.
//!
//! [`Reporter`] keeps two additive accumulators that the scheduler feeds with
//! directly measured durations: generation (row generation plus encoding) and
//! load (time spent inside batch transactions). The run's wall time is
//! measured separately, so overhead outside both phases is never folded into
//! either of them.
//!
//! On completion, successful or not, [`Reporter::finish`] reads the live row
//! counts from the store and appends one row to an append-only CSV file,
//! writing the header first when the file is new.

use crate::{
    error::{Error, Result},
    scheduler::Batch,
    store::{Store, Table},
};
use chrono::Local;
use serde::{Serialize, Serializer};
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

/// Default location of the benchmark report.
pub const DEFAULT_REPORT_PATH: &str = "reports/copy_benchmarks.csv";

/// Method identifier written to every report row.
pub const METHOD: &str = "copy_stream";

/// Column header of the report file.
pub const REPORT_HEADER: [&str; 10] = [
    "ts", "engine", "method", "n_req", "addr", "users", "rels", "gen_s", "copy_s", "total_s",
];

/// Accumulated phase durations of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTimings {
    /// Row generation and encoding, summed over all batches.
    pub generation: Duration,
    /// Time inside batch transactions, summed over all batches.
    pub load: Duration,
    /// Wall time from the start of the run.
    pub total: Duration,
}

/// Progress emitted after each committed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub batch: usize,
    pub rows_done: u64,
    pub requested: u64,
    pub batch_size: u64,
    pub elapsed: Duration,
}

/// Live row counts read back from the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub locations: u64,
    pub persons: u64,
    pub relationships: u64,
}

impl TableCounts {
    /// Reads the committed count of every table.
    pub async fn read<S: Store>(store: &mut S) -> Result<Self, crate::StoreError> {
        Ok(Self {
            locations: store.count(Table::Location).await?,
            persons: store.count(Table::Person).await?,
            relationships: store.count(Table::Relationship).await?,
        })
    }
}

/// One summary row of the report file. Field order matches
/// [`REPORT_HEADER`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub ts: String,
    pub engine: &'static str,
    pub method: &'static str,
    pub n_req: u64,
    pub addr: u64,
    pub users: u64,
    pub rels: u64,
    #[serde(serialize_with = "one_decimal")]
    pub gen_s: f64,
    #[serde(serialize_with = "one_decimal")]
    pub copy_s: f64,
    #[serde(serialize_with = "one_decimal")]
    pub total_s: f64,
}

impl ReportRow {
    pub fn new(
        engine: &'static str,
        requested: u64,
        counts: TableCounts,
        timings: PhaseTimings,
    ) -> Self {
        Self {
            ts: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            engine,
            method: METHOD,
            n_req: requested,
            addr: counts.locations,
            users: counts.persons,
            rels: counts.relationships,
            gen_s: timings.generation.as_secs_f64(),
            copy_s: timings.load.as_secs_f64(),
            total_s: timings.total.as_secs_f64(),
        }
    }
}

fn one_decimal<S: Serializer>(secs: &f64, serializer: S) -> core::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{secs:.1}"))
}

/// Append-only CSV file holding one row per run.
#[derive(Debug, Clone)]
pub struct ReportSink {
    path: PathBuf,
}

impl Default for ReportSink {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_PATH)
    }
}

impl ReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `row`, creating the file (and its directory) with a header
    /// first if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Report`] if the file cannot be created or written.
    pub fn append(&self, row: &ReportRow) -> Result<()> {
        self.try_append(row)
            .map_err(|e| Error::Report(format!("{}: {e}", self.path.display())))
    }

    fn try_append(&self, row: &ReportRow) -> core::result::Result<(), csv::Error> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let fresh = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if fresh {
            writer.write_record(REPORT_HEADER)?;
        }
        writer.serialize(row)?;
        writer.flush()?;
        Ok(())
    }
}

/// Collects run timings and progress, and persists the final summary.
#[derive(Debug)]
pub struct Reporter {
    sink: ReportSink,
    started: Instant,
    generation: Duration,
    load: Duration,
    progress: Vec<BatchProgress>,
}

impl Reporter {
    pub fn new(sink: ReportSink) -> Self {
        Self {
            sink,
            started: Instant::now(),
            generation: Duration::ZERO,
            load: Duration::ZERO,
            progress: Vec::new(),
        }
    }

    /// Restarts the wall clock and clears all accumulators.
    pub fn start(&mut self) {
        self.started = Instant::now();
        self.generation = Duration::ZERO;
        self.load = Duration::ZERO;
        self.progress.clear();
    }

    pub fn record_generation(&mut self, elapsed: Duration) {
        self.generation += elapsed;
    }

    pub fn record_load(&mut self, elapsed: Duration) {
        self.load += elapsed;
    }

    /// Records and logs progress after `batch` committed.
    pub fn batch_done(&mut self, batch: &Batch, rows_done: u64, requested: u64) -> BatchProgress {
        let progress = BatchProgress {
            batch: batch.index,
            rows_done,
            requested,
            batch_size: batch.size,
            elapsed: self.started.elapsed(),
        };

        #[cfg(feature = "tracing")]
        tracing::info!(
            "COPIED {}/{} (chunk={})  elapsed ~{:.1}s",
            progress.rows_done,
            progress.requested,
            progress.batch_size,
            progress.elapsed.as_secs_f64()
        );

        self.progress.push(progress);
        progress
    }

    /// Progress records emitted so far, one per committed batch.
    pub fn progress(&self) -> &[BatchProgress] {
        &self.progress
    }

    /// Current accumulated timings, with `total` measured up to now.
    pub fn timings(&self) -> PhaseTimings {
        PhaseTimings {
            generation: self.generation,
            load: self.load,
            total: self.started.elapsed(),
        }
    }

    pub fn sink(&self) -> &ReportSink {
        &self.sink
    }

    /// Reads live counts from `store` and appends the run summary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Report`] if the counts cannot be read or the file
    /// cannot be written. The loaded data is unaffected either way.
    pub async fn finish<S: Store>(&mut self, store: &mut S, requested: u64) -> Result<ReportRow> {
        let timings = self.timings();
        let counts = TableCounts::read(store)
            .await
            .map_err(|e| Error::Report(format!("reading row counts: {e}")))?;

        let row = ReportRow::new(store.backend(), requested, counts, timings);
        self.sink.append(&row)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Done. gen={:.1}s copy={:.1}s total={:.1}s",
            row.gen_s,
            row.copy_s,
            row.total_s
        );
        #[cfg(feature = "tracing")]
        tracing::info!("Report -> {}", self.sink.path().display());

        Ok(row)
    }
}
