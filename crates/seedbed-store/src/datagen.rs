//! Synthetic record generation
//!
//! Produces records that satisfy a schema's column constraints from a
//! seeded or entropy-backed RNG. Values only need to be valid, never
//! unique: two calls may produce the same name.

use chrono::{Duration, NaiveDate, Utc};
use rand::prelude::*;

use seedbed_core::record::{Record, Value};
use seedbed_core::schema::{ColumnKind, TableSchema};

/// Family names for generated text values
const FAMILY_NAMES: &[&str] = &[
    "Martin", "Bernard", "Dubois", "Thomas", "Robert", "Richard", "Petit", "Durand", "Leroy",
    "Moreau", "Simon", "Laurent", "Lefebvre", "Michel", "Garcia", "David", "Bertrand", "Roux",
    "Vincent", "Fournier",
];

/// Given names for generated text values
const GIVEN_NAMES: &[&str] = &[
    "Marie", "Jean", "Pierre", "Sophie", "Paul", "Julie", "Louis", "Emma", "Hugo", "Alice",
    "Victor", "Claire", "Antoine", "Laura", "Nicolas", "Eva",
];

/// Furthest a generated date may lie in the past, in days
const MAX_DAYS_BACK: i64 = 30_000;

/// Probability that a nullable column is generated as NULL
const NULL_PROBABILITY: f64 = 0.1;

/// Generates records matching a schema's column constraints
pub struct RecordGenerator {
    rng: StdRng,
}

impl RecordGenerator {
    /// Create a generator, seeded for reproducible data or from entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        Self { rng }
    }

    /// Generate one record whose values satisfy the schema's constraints
    ///
    /// Only generated columns are filled; id and timestamp columns belong
    /// to the write path. Nullable columns come out NULL one time in ten.
    pub fn generate(&mut self, schema: &TableSchema) -> Record {
        let mut record = Record::new();

        for column in schema.generated_columns() {
            if column.nullable && self.rng.gen_bool(NULL_PROBABILITY) {
                record.push(column.name.clone(), Value::Null);
                continue;
            }

            let value = match column.kind {
                ColumnKind::Text => Value::Text(self.text_for(&column.name)),
                ColumnKind::Date => Value::Date(self.past_date()),
                ColumnKind::PrimaryKey | ColumnKind::Timestamps => continue,
            };
            record.push(column.name.clone(), value);
        }

        record
    }

    /// A plausible full personal name
    pub fn name(&mut self) -> String {
        format!("{} {}", self.first_name(), self.family_name())
    }

    /// A plausible given name
    pub fn first_name(&mut self) -> &'static str {
        GIVEN_NAMES.choose(&mut self.rng).copied().unwrap_or("Marie")
    }

    /// A date in a bounded past range
    pub fn past_date(&mut self) -> NaiveDate {
        let days_back = self.rng.gen_range(1..=MAX_DAYS_BACK);
        Utc::now().date_naive() - Duration::days(days_back)
    }

    fn family_name(&mut self) -> &'static str {
        FAMILY_NAMES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("Martin")
    }

    // Columns named first* get a bare given name, everything else a full
    // name; both satisfy the same non-empty-text contract.
    fn text_for(&mut self, column: &str) -> String {
        if column.starts_with("first") {
            self.first_name().to_string()
        } else {
            self.name()
        }
    }
}
