//! Record types produced by the generator, one triple per logical row.
//!
//! Field order in each struct is the positional column order of the
//! destination table: the encoder serializes them as-is without a header.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// A postal location (`core_address`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub id: u64,
    pub street: String,
    pub street_number: String,
    pub postal_code: String,
    pub city: &'static str,
    pub country: &'static str,
}

/// A person living at the location generated for the same row
/// (`core_appuser`).
///
/// `last_updated >= created` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub id: u64,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub gender: Gender,
    /// `cust-NNNNN`; not unique.
    pub customer_code: String,
    pub phone_number: String,
    pub location_id: u64,
    pub birth_date: NaiveDate,
    #[serde(serialize_with = "timestamp")]
    pub created: DateTime<Utc>,
    #[serde(serialize_with = "timestamp")]
    pub last_updated: DateTime<Utc>,
}

/// Per-person relationship metric (`core_customerrelationship`).
///
/// Timestamps are sampled independently of the person's. `last_activity >=
/// created` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub person_id: u64,
    pub points: i32,
    #[serde(serialize_with = "timestamp")]
    pub created: DateTime<Utc>,
    #[serde(serialize_with = "timestamp")]
    pub last_activity: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
    #[serde(rename = "o")]
    Other,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];
}

/// One generated logical row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub location: Location,
    pub person: Person,
    pub relationship: Relationship,
}

// RFC 3339 with microseconds and a numeric offset, e.g.
// `2024-05-01T10:00:00.000000+00:00`.
fn timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, false))
}
