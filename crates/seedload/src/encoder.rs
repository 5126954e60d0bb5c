//! CSV encoding of one batch, one buffer per destination table.
//!
//! Rows are written straight from the generator into the three buffers, so a
//! batch is never materialized as a `Vec<Row>`. Buffers carry no header row;
//! columns are positional and match [`Table::columns`].

use crate::{
    error::Result,
    generator::RecordGenerator,
    scheduler::Batch,
    sequence::KeyRange,
    store::Table,
};
use csv::{Writer, WriterBuilder};

/// The encoded rows of one batch.
///
/// Each buffer holds exactly [`EncodedBatch::rows`] CSV records. The batch is
/// dropped once its load completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedBatch {
    locations: Vec<u8>,
    persons: Vec<u8>,
    relationships: Vec<u8>,
    rows: u64,
}

impl EncodedBatch {
    /// Buffer destined for `table`.
    pub fn buffer(&self, table: Table) -> &[u8] {
        match table {
            Table::Location => &self.locations,
            Table::Person => &self.persons,
            Table::Relationship => &self.relationships,
        }
    }

    /// Number of records in each buffer.
    pub const fn rows(&self) -> u64 {
        self.rows
    }

    /// Total encoded size across all three buffers.
    pub fn bytes(&self) -> usize {
        self.locations.len() + self.persons.len() + self.relationships.len()
    }
}

/// Generates and encodes every row of `batch` using the keys in `keys`.
///
/// # Errors
///
/// Returns [`Error::Encode`](crate::Error::Encode) if a record cannot be
/// serialized.
pub fn encode_batch(
    generator: &mut RecordGenerator,
    batch: &Batch,
    keys: KeyRange,
) -> Result<EncodedBatch> {
    let mut locations = writer(batch.size);
    let mut persons = writer(batch.size);
    let mut relationships = writer(batch.size);

    for (row, (location_id, person_id)) in batch.rows().zip(keys.pairs()) {
        let row = generator.row(row, location_id, person_id);
        locations.serialize(&row.location)?;
        persons.serialize(&row.person)?;
        relationships.serialize(&row.relationship)?;
    }

    Ok(EncodedBatch {
        locations: finish(locations)?,
        persons: finish(persons)?,
        relationships: finish(relationships)?,
        rows: batch.size,
    })
}

// Rough per-record size; only used to avoid regrowing the buffer.
const BYTES_PER_ROW: u64 = 96;

fn writer(rows: u64) -> Writer<Vec<u8>> {
    let capacity = usize::try_from(rows.saturating_mul(BYTES_PER_ROW)).unwrap_or(usize::MAX);
    WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::with_capacity(capacity))
}

fn finish(writer: Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| crate::Error::Encode(e.into_error().into()))
}
