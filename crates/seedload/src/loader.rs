//! Reset and per-batch transactional transfer into a [`Store`].

use crate::{
    encoder::EncodedBatch,
    error::StoreError,
    store::{Store, Table, Transfer},
};

/// Drives the storage port for one run.
///
/// [`BulkLoader::reset`] runs once before the batch loop. Every
/// [`BulkLoader::load`] call is one transaction that streams the Location,
/// Person, and Relationship buffers in [`Table::LOAD_ORDER`]; if any stream
/// fails the transaction is rolled back and no row of the batch is visible.
pub struct BulkLoader<'s, S: Store> {
    store: &'s mut S,
}

impl<'s, S: Store> BulkLoader<'s, S> {
    pub const fn new(store: &'s mut S) -> Self {
        Self { store }
    }

    /// Truncates every destination table and restarts identities.
    ///
    /// # Errors
    ///
    /// Propagates the store's failure; nothing has been loaded at that point.
    pub async fn reset(&mut self) -> Result<(), StoreError> {
        #[cfg(feature = "tracing")]
        tracing::debug!("Resetting {} tables", Table::LOAD_ORDER.len());
        self.store.reset().await
    }

    /// Loads one encoded batch inside a single transaction.
    ///
    /// Returns the number of rows committed per table.
    ///
    /// # Errors
    ///
    /// Returns the first failing stream's error after rolling the batch
    /// back. A stream that accepts a different number of rows than the batch
    /// holds is treated as malformed.
    pub async fn load(&mut self, batch: &EncodedBatch) -> Result<u64, StoreError> {
        let mut tx = self.store.begin().await?;

        for table in Table::LOAD_ORDER {
            let outcome = match tx.copy_in(table, batch.buffer(table)).await {
                Ok(copied) if copied == batch.rows() => Ok(()),
                Ok(copied) => Err(StoreError::Malformed {
                    table,
                    reason: format!("expected {} rows, store accepted {copied}", batch.rows()),
                }),
                Err(e) => Err(e),
            };

            if let Err(e) = outcome {
                #[cfg(feature = "tracing")]
                tracing::debug!("Rolling back batch after `{table}` failed: {e}");
                if let Err(_rollback) = tx.rollback().await {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Rollback failed: {_rollback}");
                }
                return Err(e);
            }
        }

        tx.commit().await?;
        Ok(batch.rows())
    }
}
