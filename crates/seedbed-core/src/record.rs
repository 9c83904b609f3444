//! Records conforming to a table schema
//!
//! A `Record` is an ordered mapping from column name to value. Records are
//! validated against a `TableSchema` before they reach the write path, so
//! a generated value that the backend would reject is caught with the same
//! rules the backend enforces.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::errors::{ProvisionError, Result};
use crate::schema::{ColumnKind, TableSchema};

/// A single dynamically-typed field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Real(f64),
    /// Text value
    Text(String),
    /// Calendar date
    Date(NaiveDate),
}

impl Value {
    /// Check if this value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// An ordered mapping from column name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.fields.push((name.into(), value));
    }

    /// Get a field value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Get the fields in insertion order
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate this record against a schema
    ///
    /// Enforces the constraints the backend write path enforces:
    /// - every field names a generated column of the schema (id and
    ///   timestamp columns are owned by the write path)
    /// - every non-nullable generated column is present with a non-empty,
    ///   type-correct value
    /// - nullable columns may be absent or NULL
    ///
    /// # Errors
    ///
    /// `Write` describing the first violated constraint.
    pub fn validate(&self, schema: &TableSchema) -> Result<()> {
        for (name, _) in &self.fields {
            let column = schema
                .columns()
                .iter()
                .find(|c| &c.name == name)
                .ok_or_else(|| reject(schema, format!("unknown column '{}'", name)))?;
            if !column.is_generated() {
                return Err(reject(
                    schema,
                    format!("column '{}' is filled by the write path", name),
                ));
            }
        }

        for column in schema.generated_columns() {
            let value = match self.get(&column.name) {
                Some(value) => value,
                None if column.nullable => continue,
                None => {
                    return Err(reject(
                        schema,
                        format!("missing value for non-nullable column '{}'", column.name),
                    ))
                }
            };

            if value.is_null() {
                if column.nullable {
                    continue;
                }
                return Err(reject(
                    schema,
                    format!("NULL for non-nullable column '{}'", column.name),
                ));
            }

            match (column.kind, value) {
                (ColumnKind::Text, Value::Text(s)) => {
                    if s.is_empty() {
                        return Err(reject(
                            schema,
                            format!("empty text for column '{}'", column.name),
                        ));
                    }
                }
                (ColumnKind::Date, Value::Date(_)) => {}
                _ => {
                    return Err(reject(
                        schema,
                        format!("type mismatch for column '{}'", column.name),
                    ))
                }
            }
        }

        Ok(())
    }
}

fn reject(schema: &TableSchema, message: String) -> ProvisionError {
    ProvisionError::Write {
        table: schema.name().to_string(),
        message,
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
