//! Deterministic generation of correlated row triples.
//!
//! [`RecordGenerator`] owns the run's single PRNG handle. Before producing row
//! *i* it positions the handle on ChaCha stream *i*, so the values of a row
//! depend only on the seed, the anchor time, and *i*. Batch boundaries, batch
//! sizes, and the rows generated before it have no influence.
//!
//! Each row consumes its draws in a fixed order:
//!
//! 1. street stem, street suffix, street number, postal code, city, country
//! 2. first name, last name, created offset, updated offset, gender,
//!    customer code, phone prefix, phone digits, birth date
//! 3. relationship created offset, last-activity offset, points

use crate::{
    record::{Gender, Location, Person, Relationship, Row},
    words,
};
use chrono::{DateTime, Days, NaiveDate, TimeDelta, Utc};
use core::ops::RangeInclusive;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

pub const STREET_NUMBERS: RangeInclusive<u32> = 1..=250;
pub const POSTAL_CODES: RangeInclusive<u32> = 1_000..=99_999;
pub const CUSTOMER_CODES: RangeInclusive<u32> = 1..=5_000;
pub const POINTS: RangeInclusive<i32> = 0..=100_000;
/// Offset range, in days, for every created/updated/activity timestamp.
pub const DAY_OFFSETS: RangeInclusive<u64> = 0..=3_650;

pub const BIRTH_FIRST: NaiveDate = match NaiveDate::from_ymd_opt(1940, 1, 1) {
    Some(date) => date,
    None => panic!("invalid birth range start"),
};
pub const BIRTH_LAST: NaiveDate = match NaiveDate::from_ymd_opt(2007, 12, 31) {
    Some(date) => date,
    None => panic!("invalid birth range end"),
};

const PHONE_DIGITS: usize = 13;

/// Produces one [`Row`] per logical row index.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use seedload::{DEFAULT_SEED, RecordGenerator};
///
/// let anchor = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
/// let mut a = RecordGenerator::new(DEFAULT_SEED, anchor);
/// let mut b = RecordGenerator::new(DEFAULT_SEED, anchor);
///
/// // Row 7 is the same whether or not rows 1..=6 were generated first.
/// for i in 1..=6 {
///     a.row(i, i, i);
/// }
/// assert_eq!(a.row(7, 7, 7), b.row(7, 7, 7));
/// ```
pub struct RecordGenerator {
    rng: ChaCha8Rng,
    anchor: DateTime<Utc>,
    birth_span: u64,
}

impl RecordGenerator {
    /// Creates a generator for `seed`. All created timestamps are sampled
    /// backwards from `anchor`, which is fixed for the whole run.
    pub fn new(seed: u64, anchor: DateTime<Utc>) -> Self {
        let birth_span = u64::try_from(BIRTH_LAST.signed_duration_since(BIRTH_FIRST).num_days())
            .unwrap_or_default();
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            anchor,
            birth_span,
        }
    }

    /// Generates the triple for logical row `row` (1-based), using the
    /// pre-assigned primary keys.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn row(&mut self, row: u64, location_id: u64, person_id: u64) -> Row {
        self.rng.set_stream(row);
        self.rng.set_word_pos(0);

        let location = self.location(location_id);
        let person = self.person(person_id, location_id);
        let relationship = self.relationship(person_id);

        Row {
            location,
            person,
            relationship,
        }
    }

    fn location(&mut self, id: u64) -> Location {
        let stem = pick(&mut self.rng, words::STREET_STEMS);
        let suffix = pick(&mut self.rng, words::STREET_SUFFIXES);
        let street_number = self.rng.random_range(STREET_NUMBERS);
        let postal_code = self.rng.random_range(POSTAL_CODES);

        Location {
            id,
            street: format!("{stem} {suffix}"),
            street_number: street_number.to_string(),
            postal_code: postal_code.to_string(),
            city: pick(&mut self.rng, words::CITIES),
            country: pick(&mut self.rng, words::COUNTRIES),
        }
    }

    fn person(&mut self, id: u64, location_id: u64) -> Person {
        let first_name = pick(&mut self.rng, words::FIRST_NAMES);
        let last_name = pick(&mut self.rng, words::LAST_NAMES);
        let (created, last_updated) = self.lifespan();
        let gender = Gender::ALL[self.rng.random_range(0..Gender::ALL.len())];
        let customer_code = format!("cust-{:05}", self.rng.random_range(CUSTOMER_CODES));
        let phone_number = self.phone_number();
        let birth_date = BIRTH_FIRST + Days::new(self.rng.random_range(0..=self.birth_span));

        Person {
            id,
            first_name,
            last_name,
            gender,
            customer_code,
            phone_number,
            location_id,
            birth_date,
            created,
            last_updated,
        }
    }

    fn relationship(&mut self, person_id: u64) -> Relationship {
        let (created, last_activity) = self.lifespan();
        Relationship {
            person_id,
            points: self.rng.random_range(POINTS),
            created,
            last_activity,
        }
    }

    /// `created = anchor - d1`, `later = created + d2`, with `d1` and `d2`
    /// drawn independently from [`DAY_OFFSETS`].
    fn lifespan(&mut self) -> (DateTime<Utc>, DateTime<Utc>) {
        let created = self.anchor - days(self.rng.random_range(DAY_OFFSETS));
        let later = created + days(self.rng.random_range(DAY_OFFSETS));
        (created, later)
    }

    fn phone_number(&mut self) -> String {
        let prefix = pick(&mut self.rng, words::DIAL_PREFIXES);
        let width = PHONE_DIGITS - prefix.len();
        let bound = 10_u64.pow(width as u32);
        let subscriber = self.rng.random_range(0..bound);
        format!("{prefix}{subscriber:0width$}")
    }
}

fn pick(rng: &mut ChaCha8Rng, words: &'static [&'static str]) -> &'static str {
    words[rng.random_range(0..words.len())]
}

fn days(n: u64) -> TimeDelta {
    // DAY_OFFSETS keeps `n` far below i64::MAX.
    TimeDelta::days(n as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn rows_are_reproducible_for_the_same_seed() {
        let mut a = RecordGenerator::new(DEFAULT_SEED, anchor());
        let mut b = RecordGenerator::new(DEFAULT_SEED, anchor());
        for i in 1..=50 {
            assert_eq!(a.row(i, i, i), b.row(i, i, i));
        }
    }

    #[test]
    fn row_values_do_not_depend_on_preceding_rows() {
        let mut sequential = RecordGenerator::new(DEFAULT_SEED, anchor());
        let expected: Vec<_> = (1..=20).map(|i| sequential.row(i, i, i)).collect();

        let mut reversed = RecordGenerator::new(DEFAULT_SEED, anchor());
        for i in (1..=20).rev() {
            assert_eq!(reversed.row(i, i, i), expected[(i - 1) as usize]);
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = RecordGenerator::new(1, anchor());
        let mut b = RecordGenerator::new(2, anchor());
        let differs = (1..=10).any(|i| a.row(i, i, i) != b.row(i, i, i));
        assert!(differs);
    }

    #[test]
    fn fields_respect_their_ranges() {
        let mut generator = RecordGenerator::new(DEFAULT_SEED, anchor());
        let earliest = anchor() - TimeDelta::days(3_650);
        let latest = anchor() + TimeDelta::days(3_650);

        for i in 1..=2_000 {
            let Row {
                location,
                person,
                relationship,
            } = generator.row(i, i, i);

            assert_eq!(location.id, i);
            assert!(STREET_NUMBERS.contains(&location.street_number.parse::<u32>().unwrap()));
            assert!(POSTAL_CODES.contains(&location.postal_code.parse::<u32>().unwrap()));

            assert_eq!(person.location_id, location.id);
            assert!(person.birth_date >= BIRTH_FIRST && person.birth_date <= BIRTH_LAST);
            assert!(person.created >= earliest && person.created <= anchor());
            assert!(person.last_updated >= person.created && person.last_updated <= latest);
            assert_eq!(person.phone_number.len(), PHONE_DIGITS);
            let code: u32 = person.customer_code["cust-".len()..].parse().unwrap();
            assert!(CUSTOMER_CODES.contains(&code));
            assert_eq!(person.customer_code.len(), "cust-".len() + 5);

            assert_eq!(relationship.person_id, person.id);
            assert!(POINTS.contains(&relationship.points));
            assert!(relationship.created >= earliest && relationship.created <= anchor());
            assert!(relationship.last_activity >= relationship.created);
        }
    }

    #[test]
    fn every_gender_is_produced() {
        let mut generator = RecordGenerator::new(DEFAULT_SEED, anchor());
        let seen: std::collections::HashSet<_> =
            (1..=200).map(|i| generator.row(i, i, i).person.gender).collect();
        assert_eq!(seen.len(), Gender::ALL.len());
    }
}
