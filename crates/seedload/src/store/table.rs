use core::fmt;

/// The three destination tables, in foreign-key dependency order.
///
/// Names and column lists are a fixed external contract: every encoded buffer
/// is positional and must line up with [`Table::columns`] exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    /// Postal locations (`core_address`).
    Location,
    /// People, each referencing the location of the same row
    /// (`core_appuser`).
    Person,
    /// One relationship metric per person (`core_customerrelationship`).
    Relationship,
}

impl Table {
    /// Load order within a batch transaction. Each table only references
    /// tables earlier in this list.
    pub const LOAD_ORDER: [Self; 3] = [Self::Location, Self::Person, Self::Relationship];

    /// Truncates every table, restarts identity counters, and cascades to
    /// dependents in a single statement.
    pub const RESET_SQL: &'static str =
        "TRUNCATE core_customerrelationship, core_appuser, core_address RESTART IDENTITY CASCADE";

    /// Physical table name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Location => "core_address",
            Self::Person => "core_appuser",
            Self::Relationship => "core_customerrelationship",
        }
    }

    /// Positional column list used by every bulk-load call.
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Location => &[
                "id",
                "street",
                "street_number",
                "city_code",
                "city",
                "country",
            ],
            Self::Person => &[
                "id",
                "first_name",
                "last_name",
                "gender",
                "customer_id",
                "phone_number",
                "address_id",
                "birthday",
                "created",
                "last_updated",
            ],
            Self::Relationship => &["appuser_id", "points", "created", "last_activity"],
        }
    }

    /// `COPY ... FROM STDIN` statement targeting this table's column list.
    pub fn copy_statement(self) -> String {
        format!(
            "COPY {} ({}) FROM STDIN WITH (FORMAT CSV)",
            self.name(),
            self.columns().join(", ")
        )
    }

    /// `SELECT COUNT(*)` statement for this table.
    pub fn count_statement(self) -> String {
        format!("SELECT COUNT(*) FROM {}", self.name())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
