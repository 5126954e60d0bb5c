//! Primary-key counters shared across batches.
//!
//! [`KeySequence`] is the only place that assigns primary keys. It is created
//! once per run and threaded through the scheduler, so every batch receives a
//! pre-computed, non-overlapping [`KeyRange`].

/// Running counters for the next Location and Person primary keys.
///
/// Both start at `1` and advance by exactly the reserved size. They are never
/// reset mid-run.
///
/// # Example
/// ```
/// use seedload::KeySequence;
///
/// let mut keys = KeySequence::new();
/// let first = keys.reserve(4);
/// let second = keys.reserve(2);
///
/// assert_eq!(first.location_ids(), 1..5);
/// assert_eq!(second.person_ids(), 5..7);
/// assert_eq!(keys.next_location(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySequence {
    next_location: u64,
    next_person: u64,
}

impl Default for KeySequence {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySequence {
    /// Counters positioned at the first key of a freshly reset table.
    pub const fn new() -> Self {
        Self::from_components(1, 1)
    }

    /// Creates counters from explicit starting keys.
    pub const fn from_components(next_location: u64, next_person: u64) -> Self {
        Self {
            next_location,
            next_person,
        }
    }

    pub const fn next_location(&self) -> u64 {
        self.next_location
    }

    pub const fn next_person(&self) -> u64 {
        self.next_person
    }

    /// Hands out the next `size` keys of both sequences and advances them.
    pub const fn reserve(&mut self, size: u64) -> KeyRange {
        let range = KeyRange {
            first_location: self.next_location,
            first_person: self.next_person,
            len: size,
        };
        self.next_location += size;
        self.next_person += size;
        range
    }
}

/// Keys reserved for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRange {
    first_location: u64,
    first_person: u64,
    len: u64,
}

impl KeyRange {
    pub const fn len(&self) -> u64 {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn location_ids(&self) -> core::ops::Range<u64> {
        self.first_location..self.first_location + self.len
    }

    pub const fn person_ids(&self) -> core::ops::Range<u64> {
        self.first_person..self.first_person + self.len
    }

    /// `(location_id, person_id)` pairs in row order.
    pub fn pairs(self) -> impl Iterator<Item = (u64, u64)> {
        self.location_ids().zip(self.person_ids())
    }
}
