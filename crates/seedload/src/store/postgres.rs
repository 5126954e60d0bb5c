use crate::{
    error::StoreError,
    store::{POSTGRES_BACKEND, Store, Table, Transfer},
};
use sqlx::{Connection, PgConnection, Postgres, Transaction};

/// PostgreSQL [`Store`] backed by a single session.
///
/// Batches are streamed with `COPY <table> (<columns>) FROM STDIN WITH
/// (FORMAT CSV)`, one statement per table, inside one explicit transaction.
/// Statement timeouts are left to the server and connection settings.
pub struct PgStore {
    conn: PgConnection,
}

impl PgStore {
    /// Opens the session used for the whole run.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the connection cannot be
    /// established.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let conn = PgConnection::connect(url).await?;
        Ok(Self { conn })
    }

    /// Gracefully closes the session.
    pub async fn close(self) -> Result<(), StoreError> {
        self.conn.close().await?;
        Ok(())
    }
}

impl Store for PgStore {
    type Tx<'a> = PgTransfer<'a>;

    fn backend(&self) -> &'static str {
        POSTGRES_BACKEND
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self)))]
    async fn reset(&mut self) -> Result<(), StoreError> {
        let mut tx = self.conn.begin().await?;
        sqlx::query(Table::RESET_SQL).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn begin(&mut self) -> Result<PgTransfer<'_>, StoreError> {
        let tx = self.conn.begin().await?;
        Ok(PgTransfer { tx })
    }

    async fn count(&mut self, table: Table) -> Result<u64, StoreError> {
        let sql = table.count_statement();
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&mut self.conn).await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

/// An open PostgreSQL transaction for one batch.
///
/// Dropping it without [`Transfer::commit`] rolls the transaction back.
pub struct PgTransfer<'c> {
    tx: Transaction<'c, Postgres>,
}

impl Transfer for PgTransfer<'_> {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self, rows), fields(bytes = rows.len()))
    )]
    async fn copy_in(&mut self, table: Table, rows: &[u8]) -> Result<u64, StoreError> {
        let statement = table.copy_statement();
        let mut copy = self.tx.copy_in_raw(&statement).await?;
        let sent = copy.send(rows).await.map(|_| ());
        if let Err(e) = sent {
            // Leave the session usable for the rollback that follows.
            if let Err(_abort) = copy.abort(e.to_string()).await {
                #[cfg(feature = "tracing")]
                tracing::warn!("Aborting COPY into `{table}` failed: {_abort}");
            }
            return Err(e.into());
        }
        Ok(copy.finish().await?)
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
