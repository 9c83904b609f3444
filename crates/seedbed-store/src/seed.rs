//! Seeding
//!
//! Inserts generated records through the schema's write path, one
//! statement per record. There is no batch transaction: a rejected record
//! is counted and the loop continues, so prior inserts always survive.

use chrono::Utc;
use rusqlite::Connection;

use seedbed_core::errors::ProvisionError;
use seedbed_core::record::{Record, Value};
use seedbed_core::schema::{TableSchema, CREATED_AT, UPDATED_AT};

use crate::datagen::RecordGenerator;
use crate::errors::{write_error, Result};

/// Outcome of a seeding run
///
/// Partial success is a normal, non-exceptional outcome: the report
/// carries the number of accepted records and the first rejection, if any.
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    /// Records generated and offered to the write path
    pub attempted: usize,
    /// Records accepted by the backend
    pub inserted: usize,
    /// First rejection encountered, if any
    pub first_error: Option<ProvisionError>,
}

impl SeedReport {
    /// Check if every attempted record was inserted
    pub fn is_complete(&self) -> bool {
        self.inserted == self.attempted
    }
}

/// Insert one generated record for every `i` in `0..=count`
///
/// The bound is inclusive: `count = 100` inserts 101 records. Each insert
/// is independent; a rejected record is recorded in the report but does
/// not stop the loop or roll back prior inserts.
pub fn run(
    conn: &Connection,
    schema: &TableSchema,
    generator: &mut RecordGenerator,
    count: usize,
) -> SeedReport {
    let mut report = SeedReport::default();

    for _ in 0..=count {
        report.attempted += 1;

        let record = generator.generate(schema);
        match insert(conn, schema, &record) {
            Ok(()) => report.inserted += 1,
            Err(err) => {
                tracing::warn!(table = schema.name(), error = %err, "record rejected");
                if report.first_error.is_none() {
                    report.first_error = Some(err);
                }
            }
        }
    }

    tracing::info!(
        table = schema.name(),
        attempted = report.attempted,
        inserted = report.inserted,
        "seeding finished"
    );

    report
}

/// Insert one record through the write path
///
/// Validates the record against the schema, fills the timestamp pair, and
/// lets the backend assign the auto-increment id.
///
/// # Errors
///
/// `Write` when the record fails validation or the backend rejects the
/// insert.
pub fn insert(conn: &Connection, schema: &TableSchema, record: &Record) -> Result<()> {
    record.validate(schema)?;

    let mut columns: Vec<&str> = Vec::new();
    let mut params: Vec<rusqlite::types::Value> = Vec::new();

    for column in schema.generated_columns() {
        columns.push(column.name.as_str());
        match record.get(&column.name) {
            Some(value) => params.push(to_sql_value(value)),
            // absent nullable column
            None => params.push(rusqlite::types::Value::Null),
        }
    }

    if schema.has_timestamps() {
        let now = Utc::now().timestamp();
        columns.push(CREATED_AT);
        params.push(rusqlite::types::Value::Integer(now));
        columns.push(UPDATED_AT);
        params.push(rusqlite::types::Value::Integer(now));
    }

    let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.name(),
        columns.join(", "),
        placeholders.join(", ")
    );

    conn.execute(&sql, rusqlite::params_from_iter(params.iter()))
        .map_err(|e| write_error(schema.name(), e))?;

    Ok(())
}

fn to_sql_value(value: &Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Integer(i) => rusqlite::types::Value::Integer(*i),
        Value::Real(f) => rusqlite::types::Value::Real(*f),
        Value::Text(s) => rusqlite::types::Value::Text(s.clone()),
        Value::Date(d) => rusqlite::types::Value::Text(d.format("%Y-%m-%d").to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sql_value_renders_dates_iso() {
        let date = chrono::NaiveDate::from_ymd_opt(1984, 6, 21).unwrap();
        let value = to_sql_value(&Value::Date(date));
        assert_eq!(
            value,
            rusqlite::types::Value::Text("1984-06-21".to_string())
        );
    }

    #[test]
    fn test_report_completeness() {
        let report = SeedReport {
            attempted: 3,
            inserted: 3,
            first_error: None,
        };
        assert!(report.is_complete());

        let report = SeedReport {
            attempted: 3,
            inserted: 2,
            first_error: Some(ProvisionError::Write {
                table: "customers".to_string(),
                message: "rejected".to_string(),
            }),
        };
        assert!(!report.is_complete());
    }
}
