//! Chunked generate -> encode -> load pipeline.
//!
//! The scheduler splits the requested row count into bounded batches with
//! [`BatchPlan`], reserves each batch's primary keys from the run's
//! [`KeySequence`], and runs the stages strictly in sequence:
//!
//! 1. generate and encode the batch (timed as generation)
//! 2. load it in one transaction (timed as load)
//! 3. emit a progress record
//!
//! The first failing batch stops the loop. Batches committed before it stay
//! in the store. The final report is attempted either way.

use crate::{
    encoder::encode_batch,
    error::{Error, Result},
    generator::{DEFAULT_SEED, RecordGenerator},
    loader::BulkLoader,
    report::{PhaseTimings, ReportRow, Reporter},
    sequence::KeySequence,
    store::Store,
};
use chrono::{DateTime, Utc};
use core::ops::Range;
use std::time::Instant;

/// Default number of rows per table.
pub const DEFAULT_ROWS: u64 = 3_000_000;

/// Default rows per batch transaction.
pub const DEFAULT_CHUNK: u64 = 100_000;

/// A contiguous run of logical rows processed as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// 1-based position of the batch in the plan.
    pub index: usize,
    /// 1-based index of the first logical row.
    pub first_row: u64,
    pub size: u64,
}

impl Batch {
    /// Logical row indices covered by this batch.
    pub const fn rows(&self) -> Range<u64> {
        self.first_row..self.first_row + self.size
    }
}

/// Partitions `total` rows into `ceil(total / chunk)` batches.
///
/// Every batch has `chunk` rows except possibly the last, which holds the
/// remainder.
///
/// # Example
/// ```
/// use seedload::BatchPlan;
///
/// let sizes: Vec<_> = BatchPlan::new(10, 4).unwrap().map(|b| b.size).collect();
/// assert_eq!(sizes, vec![4, 4, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct BatchPlan {
    total: u64,
    chunk: u64,
    done: u64,
    index: usize,
}

impl BatchPlan {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `chunk` is zero.
    pub fn new(total: u64, chunk: u64) -> Result<Self> {
        if chunk == 0 {
            return Err(Error::InvalidConfig {
                reason: "chunk size must be greater than 0".to_owned(),
            });
        }
        Ok(Self {
            total,
            chunk,
            done: 0,
            index: 0,
        })
    }

    /// Number of batches in the full plan.
    pub const fn batches(&self) -> u64 {
        self.total.div_ceil(self.chunk)
    }
}

impl Iterator for BatchPlan {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.done >= self.total {
            return None;
        }
        let size = self.chunk.min(self.total - self.done);
        self.index += 1;
        let batch = Batch {
            index: self.index,
            first_row: self.done + 1,
            size,
        };
        self.done += size;
        Some(batch)
    }
}

/// Parameters of one load run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub rows: u64,
    pub chunk: u64,
    pub seed: u64,
    /// Reference time that every generated timestamp is sampled against.
    pub anchor: DateTime<Utc>,
}

impl RunOptions {
    pub fn new(rows: u64, chunk: u64) -> Self {
        Self {
            rows,
            chunk,
            seed: DEFAULT_SEED,
            anchor: Utc::now(),
        }
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub const fn with_anchor(mut self, anchor: DateTime<Utc>) -> Self {
        self.anchor = anchor;
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_CHUNK)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub rows_loaded: u64,
    pub batches: usize,
    pub timings: PhaseTimings,
    /// The persisted summary, or `None` if reporting failed.
    pub report: Option<ReportRow>,
}

/// Owns the per-run state threaded through every batch: the plan, the key
/// counters, and the generator's PRNG handle.
pub struct Scheduler {
    options: RunOptions,
    plan: BatchPlan,
    keys: KeySequence,
    generator: RecordGenerator,
}

impl Scheduler {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the chunk size is zero.
    pub fn new(options: RunOptions) -> Result<Self> {
        Ok(Self {
            plan: BatchPlan::new(options.rows, options.chunk)?,
            keys: KeySequence::new(),
            generator: RecordGenerator::new(options.seed, options.anchor),
            options,
        })
    }

    /// Resets the store, loads every batch, and appends the run summary.
    ///
    /// A scheduler drives exactly one run; build a new one to run again.
    ///
    /// # Errors
    ///
    /// - [`Error::Reset`] if the start-of-run truncate fails.
    /// - [`Error::Batch`] for the first batch whose transaction failed; earlier
    ///   batches remain committed.
    /// - [`Error::Encode`] if a row could not be serialized.
    ///
    /// Report failures are logged and surface only as
    /// [`RunSummary::report`] being `None`.
    pub async fn run<S: Store>(
        &mut self,
        store: &mut S,
        reporter: &mut Reporter,
    ) -> Result<RunSummary> {
        #[cfg(feature = "tracing")]
        tracing::info!(
            "Generating {} rows via {} (chunk={}, batches={}, seed={})",
            self.options.rows,
            store.backend(),
            self.options.chunk,
            self.plan.batches(),
            self.options.seed
        );

        reporter.start();
        let loaded = self.load_all(store, reporter).await;

        let report = match reporter.finish(store, self.options.rows).await {
            Ok(row) => Some(row),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("{_e}");
                None
            }
        };

        let rows_loaded = loaded?;
        Ok(RunSummary {
            rows_loaded,
            batches: reporter.progress().len(),
            timings: reporter.timings(),
            report,
        })
    }

    async fn load_all<S: Store>(&mut self, store: &mut S, reporter: &mut Reporter) -> Result<u64> {
        let mut loader = BulkLoader::new(store);
        loader.reset().await.map_err(Error::Reset)?;

        let requested = self.options.rows;
        let mut done = 0;

        for batch in self.plan.by_ref() {
            let started = Instant::now();
            let keys = self.keys.reserve(batch.size);
            let encoded = encode_batch(&mut self.generator, &batch, keys)?;
            reporter.record_generation(started.elapsed());

            let started = Instant::now();
            let loaded = loader.load(&encoded).await;
            reporter.record_load(started.elapsed());
            drop(encoded);

            loaded.map_err(|source| Error::Batch {
                batch: batch.index,
                first_row: batch.first_row,
                end_row: batch.rows().end,
                source,
            })?;

            done += batch.size;
            reporter.batch_done(&batch, done, requested);
        }

        Ok(done)
    }
}
