use crate::{
    error::StoreError,
    store::{MEMORY_BACKEND, Store, Table, Transfer},
};
use csv::StringRecord;
use std::collections::{HashMap, HashSet};

/// An in-process [`Store`] that enforces the destination schema's rules.
///
/// Only keys are retained, which keeps multi-million row dry runs affordable
/// while still checking everything the relational schema checks:
///
/// - primary keys are unique per table
/// - every person references an existing location
/// - every relationship references an existing person, at most once
/// - every row has the table's exact column count and parseable keys
///
/// Rows become visible only when the surrounding [`MemoryTransfer`] commits.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    committed: Keys,
}

#[derive(Debug, Default, Clone)]
struct Keys {
    locations: HashSet<u64>,
    /// person id -> location id
    persons: HashMap<u64, u64>,
    relationships: HashSet<u64>,
}

impl Keys {
    fn absorb(&mut self, other: Self) {
        self.locations.extend(other.locations);
        self.persons.extend(other.persons);
        self.relationships.extend(other.relationships);
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location referenced by a committed person.
    pub fn location_of(&self, person: u64) -> Option<u64> {
        self.committed.persons.get(&person).copied()
    }

    /// Returns `true` if a committed row with primary key `id` exists. For
    /// [`Table::Relationship`] the key is the referenced person id.
    pub fn contains(&self, table: Table, id: u64) -> bool {
        match table {
            Table::Location => self.committed.locations.contains(&id),
            Table::Person => self.committed.persons.contains_key(&id),
            Table::Relationship => self.committed.relationships.contains(&id),
        }
    }

    /// Person ids referenced by committed relationship rows.
    pub fn relationship_persons(&self) -> impl Iterator<Item = u64> + '_ {
        self.committed.relationships.iter().copied()
    }

    fn len(&self, table: Table) -> usize {
        match table {
            Table::Location => self.committed.locations.len(),
            Table::Person => self.committed.persons.len(),
            Table::Relationship => self.committed.relationships.len(),
        }
    }
}

impl Store for MemoryStore {
    type Tx<'a> = MemoryTransfer<'a>;

    fn backend(&self) -> &'static str {
        MEMORY_BACKEND
    }

    async fn reset(&mut self) -> Result<(), StoreError> {
        self.committed = Keys::default();
        Ok(())
    }

    async fn begin(&mut self) -> Result<MemoryTransfer<'_>, StoreError> {
        Ok(MemoryTransfer {
            store: self,
            staged: Keys::default(),
        })
    }

    async fn count(&mut self, table: Table) -> Result<u64, StoreError> {
        Ok(self.len(table) as u64)
    }
}

/// An open [`MemoryStore`] transaction.
pub struct MemoryTransfer<'a> {
    store: &'a mut MemoryStore,
    staged: Keys,
}

impl MemoryTransfer<'_> {
    fn has_location(&self, id: u64) -> bool {
        self.store.committed.locations.contains(&id) || self.staged.locations.contains(&id)
    }

    fn has_person(&self, id: u64) -> bool {
        self.store.committed.persons.contains_key(&id) || self.staged.persons.contains_key(&id)
    }

    fn has_relationship(&self, person: u64) -> bool {
        self.store.committed.relationships.contains(&person)
            || self.staged.relationships.contains(&person)
    }

    /// Validates one record and returns `(key, reference)` for it.
    fn check(&self, table: Table, record: &StringRecord) -> Result<(u64, u64), StoreError> {
        let expected = table.columns().len();
        if record.len() != expected {
            return Err(StoreError::Malformed {
                table,
                reason: format!("expected {expected} columns, found {}", record.len()),
            });
        }

        match table {
            Table::Location => {
                let id = parse_key(table, record, 0)?;
                if self.has_location(id) {
                    return Err(duplicate(table, "id", id));
                }
                Ok((id, 0))
            }
            Table::Person => {
                let id = parse_key(table, record, 0)?;
                let location = parse_key(table, record, 6)?;
                if self.has_person(id) {
                    return Err(duplicate(table, "id", id));
                }
                if !self.has_location(location) {
                    return Err(StoreError::Constraint {
                        table,
                        reason: format!("address_id={location} is not present in core_address"),
                    });
                }
                Ok((id, location))
            }
            Table::Relationship => {
                let person = parse_key(table, record, 0)?;
                record[1].parse::<i32>().map_err(|e| StoreError::Malformed {
                    table,
                    reason: format!("points `{}`: {e}", &record[1]),
                })?;
                if self.has_relationship(person) {
                    return Err(duplicate(table, "appuser_id", person));
                }
                if !self.has_person(person) {
                    return Err(StoreError::Constraint {
                        table,
                        reason: format!("appuser_id={person} is not present in core_appuser"),
                    });
                }
                Ok((person, 0))
            }
        }
    }
}

impl Transfer for MemoryTransfer<'_> {
    async fn copy_in(&mut self, table: Table, rows: &[u8]) -> Result<u64, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(rows);

        // A COPY statement is atomic on its own, so rows are staged only once
        // the whole stream has been accepted.
        let mut accepted = Keys::default();
        let mut record = StringRecord::new();
        let mut count = 0_u64;

        loop {
            let more = reader
                .read_record(&mut record)
                .map_err(|e| StoreError::Malformed {
                    table,
                    reason: e.to_string(),
                })?;
            if !more {
                break;
            }

            let (key, reference) = self.check(table, &record)?;
            let fresh = match table {
                Table::Location => accepted.locations.insert(key),
                Table::Person => accepted.persons.insert(key, reference).is_none(),
                Table::Relationship => accepted.relationships.insert(key),
            };
            if !fresh {
                return Err(duplicate(table, table.columns()[0], key));
            }
            count += 1;
        }

        self.staged.absorb(accepted);
        Ok(count)
    }

    async fn commit(self) -> Result<(), StoreError> {
        let Self { store, staged } = self;
        store.committed.absorb(staged);
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn parse_key(table: Table, record: &StringRecord, idx: usize) -> Result<u64, StoreError> {
    let raw = &record[idx];
    raw.parse::<u64>().map_err(|e| StoreError::Malformed {
        table,
        reason: format!("{} `{raw}`: {e}", table.columns()[idx]),
    })
}

fn duplicate(table: Table, column: &str, key: u64) -> StoreError {
    StoreError::Constraint {
        table,
        reason: format!("duplicate key {column}={key}"),
    }
}
