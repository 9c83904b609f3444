//! Table schema descriptors
//!
//! A `TableSchema` declares a named table as an ordered sequence of typed
//! columns. Schemas are constructed through a typed builder that rejects
//! malformed descriptors at build time, so the migrator only ever sees
//! schemas that satisfy the structural invariants.

use serde::{Deserialize, Serialize};

use crate::errors::{ProvisionError, Result};

/// Column name used for the creation half of a `Timestamps` pair
pub const CREATED_AT: &str = "created_at";
/// Column name used for the update half of a `Timestamps` pair
pub const UPDATED_AT: &str = "updated_at";

/// Column type in a table schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Auto-increment integer primary key, assigned by the backend
    PrimaryKey,
    /// Text value
    Text,
    /// Calendar date, stored as ISO-8601 text
    Date,
    /// Marker for a `created_at`/`updated_at` pair, filled by the write path
    Timestamps,
}

/// A single typed column in a table schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (a valid SQL identifier)
    pub name: String,

    /// Column type
    pub kind: ColumnKind,

    /// Whether NULL is an accepted value
    pub nullable: bool,
}

impl Column {
    fn new(name: impl Into<String>, kind: ColumnKind, nullable: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable,
        }
    }

    /// Check if this column's values come from the record generator
    ///
    /// PrimaryKey and Timestamps columns are owned by the write path and
    /// are never part of a generated record.
    pub fn is_generated(&self) -> bool {
        matches!(self.kind, ColumnKind::Text | ColumnKind::Date)
    }
}

/// A named table with an ordered sequence of typed columns
///
/// Only obtainable through the builder, so every value satisfies the
/// structural invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSchema {
    name: String,
    columns: Vec<Column>,
}

impl TableSchema {
    /// Start building a schema for the given table name
    pub fn builder(name: impl Into<String>) -> TableSchemaBuilder {
        TableSchemaBuilder {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Get the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared columns, in declared order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Iterate over the columns the record generator must fill
    pub fn generated_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_generated())
    }

    /// Check if this schema carries a `created_at`/`updated_at` pair
    pub fn has_timestamps(&self) -> bool {
        self.columns
            .iter()
            .any(|c| c.kind == ColumnKind::Timestamps)
    }
}

/// Builder for `TableSchema`
///
/// Column declaration mirrors the shape of an up-migration: declare the
/// auto-increment id first, then the typed columns, then the timestamp
/// pair. `build` validates the assembled descriptor and is the only way
/// to obtain a `TableSchema`.
#[derive(Debug, Clone)]
pub struct TableSchemaBuilder {
    name: String,
    columns: Vec<Column>,
}

impl TableSchemaBuilder {
    /// Declare an auto-increment integer primary key
    pub fn increments(mut self, name: impl Into<String>) -> Self {
        self.columns
            .push(Column::new(name, ColumnKind::PrimaryKey, false));
        self
    }

    /// Declare a non-null text column
    pub fn string(mut self, name: impl Into<String>) -> Self {
        self.columns.push(Column::new(name, ColumnKind::Text, false));
        self
    }

    /// Declare a non-null date column
    pub fn date(mut self, name: impl Into<String>) -> Self {
        self.columns.push(Column::new(name, ColumnKind::Date, false));
        self
    }

    /// Declare a nullable date column
    pub fn nullable_date(mut self, name: impl Into<String>) -> Self {
        self.columns.push(Column::new(name, ColumnKind::Date, true));
        self
    }

    /// Declare a `created_at`/`updated_at` pair, filled at insert time
    pub fn timestamps(mut self) -> Self {
        self.columns
            .push(Column::new("timestamps", ColumnKind::Timestamps, false));
        self
    }

    /// Validate the assembled descriptor and produce the schema
    ///
    /// # Errors
    ///
    /// `InvalidDescriptor` when:
    /// - the table or a column name is not a valid identifier
    /// - no columns are declared
    /// - the first column is not the primary key, or there is more than one
    /// - a `timestamps` pair is not last, or appears more than once
    /// - column names collide (including the implied `created_at` and
    ///   `updated_at` names)
    pub fn build(self) -> Result<TableSchema> {
        if !is_identifier(&self.name) {
            return Err(invalid(format!("table name '{}' is not a valid identifier", self.name)));
        }
        if self.columns.is_empty() {
            return Err(invalid(format!("table '{}' declares no columns", self.name)));
        }
        if self.columns[0].kind != ColumnKind::PrimaryKey {
            return Err(invalid(format!(
                "table '{}': the first column must be the auto-increment id",
                self.name
            )));
        }

        let pk_count = self
            .columns
            .iter()
            .filter(|c| c.kind == ColumnKind::PrimaryKey)
            .count();
        if pk_count != 1 {
            return Err(invalid(format!(
                "table '{}': expected exactly one primary key column, found {}",
                self.name, pk_count
            )));
        }

        let ts_count = self
            .columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Timestamps)
            .count();
        if ts_count > 1 {
            return Err(invalid(format!(
                "table '{}': at most one timestamps pair is allowed",
                self.name
            )));
        }
        if ts_count == 1 && self.columns.last().map(|c| c.kind) != Some(ColumnKind::Timestamps) {
            return Err(invalid(format!(
                "table '{}': the timestamps pair must be declared last",
                self.name
            )));
        }

        // Uniqueness over the effective SQL column names
        let mut seen: Vec<&str> = Vec::new();
        for column in &self.columns {
            let names: Vec<&str> = match column.kind {
                ColumnKind::Timestamps => vec![CREATED_AT, UPDATED_AT],
                _ => {
                    if !is_identifier(&column.name) {
                        return Err(invalid(format!(
                            "table '{}': column name '{}' is not a valid identifier",
                            self.name, column.name
                        )));
                    }
                    vec![column.name.as_str()]
                }
            };
            for name in names {
                if seen.contains(&name) {
                    return Err(invalid(format!(
                        "table '{}': duplicate column name '{}'",
                        self.name, name
                    )));
                }
                seen.push(name);
            }
        }

        Ok(TableSchema {
            name: self.name,
            columns: self.columns,
        })
    }
}

fn invalid(reason: String) -> ProvisionError {
    ProvisionError::InvalidDescriptor { reason }
}

/// Check that a string is a plain SQL identifier
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
