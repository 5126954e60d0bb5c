//! Error types for dataset generation and bulk loading.
//!
//! This module defines the crate-level [`Error`] enum, which captures the three
//! failure classes a load run can end in, and [`StoreError`], which captures
//! failures raised by a storage backend.
//!
//! ## Error Cases
//! - `UnsupportedBackend` / `InvalidConfig`: the run was rejected before any
//!   write reached the store.
//! - `Reset`: the start-of-run truncate failed; nothing was loaded.
//! - `Batch`: one batch transaction failed and was rolled back. Batches
//!   committed before it remain in the store.
//! - `Encode`: a generated row could not be serialized.
//! - `Report`: the benchmark summary could not be persisted. Callers log this
//!   and keep the load outcome unchanged.

use crate::store::Table;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Unified error type for a load run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The configured backend has no streaming bulk-load protocol.
    #[error("Backend `{backend}` does not support streaming bulk load")]
    UnsupportedBackend { backend: String },

    /// Run parameters failed validation.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The start-of-run truncate failed.
    #[error("Reset failed: {0}")]
    Reset(#[source] StoreError),

    /// A batch transaction failed and was rolled back in full.
    #[error("Batch {batch} (rows {first_row}..{end_row}) failed: {source}")]
    Batch {
        batch: usize,
        first_row: u64,
        end_row: u64,
        #[source]
        source: StoreError,
    },

    /// Row serialization failed.
    #[error("Encoding failed: {0}")]
    Encode(#[from] csv::Error),

    /// The benchmark summary could not be persisted.
    #[error("Report failed: {0}")]
    Report(String),
}

/// Failures raised by a [`Store`](crate::store::Store) implementation.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// A primary key, foreign key, or uniqueness rule was violated.
    #[error("Constraint violation on `{table}`: {reason}")]
    Constraint { table: Table, reason: String },

    /// An encoded row did not match the table's column contract.
    #[error("Malformed row for `{table}`: {reason}")]
    Malformed { table: Table, reason: String },

    /// Error surfaced by the database driver.
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

