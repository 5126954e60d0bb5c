//! Deterministic synthetic dataset generation and streaming bulk load.
//!
//! A run produces `N` correlated triples (a [`Location`], a [`Person`] living
//! there, and that person's [`Relationship`] metric), encodes them batch by
//! batch as CSV, and streams each batch into a [`Store`] inside one
//! transaction. Timings and live row counts are appended to a CSV report.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use seedload::{MemoryStore, Reporter, ReportSink, RunOptions, Scheduler, Store, Table};
//!
//! # block_on(async {
//! let dir = tempfile::tempdir().unwrap();
//! let anchor = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
//!
//! let mut store = MemoryStore::new();
//! let mut reporter = Reporter::new(ReportSink::new(dir.path().join("report.csv")));
//! let mut scheduler = Scheduler::new(RunOptions::new(10, 4).with_anchor(anchor)).unwrap();
//!
//! let summary = scheduler.run(&mut store, &mut reporter).await.unwrap();
//! assert_eq!(summary.rows_loaded, 10);
//! assert_eq!(store.count(Table::Relationship).await.unwrap(), 10);
//! # });
//! # fn block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod encoder;
mod error;
mod generator;
mod loader;
mod record;
mod report;
mod scheduler;
mod sequence;
pub mod store;
mod words;

pub use crate::encoder::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::loader::*;
pub use crate::record::*;
pub use crate::report::*;
pub use crate::scheduler::*;
pub use crate::sequence::*;
pub use crate::store::*;

#[cfg(test)]
mod tests;
