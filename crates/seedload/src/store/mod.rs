//! Narrow storage port used by the loader.
//!
//! A backend exposes exactly three capabilities: an atomic cascading reset, a
//! transaction that accepts table-targeted CSV streams, and live row counts.
//! Generation and chunking never talk to a database directly; they only see
//! these traits.
//!
//! ## Structure
//!
//! - [`Table`] - Destination tables and their fixed column contracts.
//! - [`MemoryStore`] - In-process backend enforcing the same constraints.
//! - [`PgStore`] - PostgreSQL backend using `COPY ... FROM STDIN` (feature
//!   `postgres`).
//! - [`Backend`] - Selects a backend from a database URL and rejects those
//!   without a bulk-load protocol.

mod backend;
mod memory;
#[cfg(feature = "postgres")]
mod postgres;
mod table;

pub use backend::*;
pub use memory::*;
#[cfg_attr(docsrs, doc(cfg(feature = "postgres")))]
#[cfg(feature = "postgres")]
pub use postgres::*;
pub use table::*;

use crate::error::StoreError;

/// A storage engine that supports streaming bulk load.
///
/// One caller drives a store at a time; methods take `&mut self` and the
/// pipeline never overlaps calls.
#[allow(async_fn_in_trait)]
pub trait Store {
    /// An open transaction accepting bulk-load streams.
    type Tx<'a>: Transfer
    where
        Self: 'a;

    /// Backend identifier written to the benchmark report.
    fn backend(&self) -> &'static str;

    /// Truncates all destination tables and restarts their identity counters
    /// atomically, cascading to dependents.
    async fn reset(&mut self) -> Result<(), StoreError>;

    /// Opens a transaction for one batch.
    async fn begin(&mut self) -> Result<Self::Tx<'_>, StoreError>;

    /// Returns the committed row count of `table`.
    async fn count(&mut self, table: Table) -> Result<u64, StoreError>;
}

/// One open batch transaction.
///
/// Nothing streamed through [`Transfer::copy_in`] is visible until
/// [`Transfer::commit`] succeeds. Dropping a transfer without committing
/// discards everything it received.
#[allow(async_fn_in_trait)]
pub trait Transfer {
    /// Streams CSV `rows` (no header, [`Table::columns`] order) into `table`.
    /// Returns the number of rows accepted.
    async fn copy_in(&mut self, table: Table, rows: &[u8]) -> Result<u64, StoreError>;

    /// Makes every stream received by this transaction visible.
    async fn commit(self) -> Result<(), StoreError>;

    /// Discards every stream received by this transaction.
    async fn rollback(self) -> Result<(), StoreError>;
}
