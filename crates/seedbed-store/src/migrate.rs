//! Schema migration
//!
//! Applies one drop-then-create schema change. The fixture contract is a
//! clean deterministic dataset, so an existing table is dropped
//! unconditionally; callers needing additive migrations are out of scope
//! here.

use rusqlite::Connection;

use seedbed_core::schema::{ColumnKind, TableSchema, CREATED_AT, UPDATED_AT};

use crate::errors::{schema_error, Result};

/// A column as reported by the backend's table metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Declared SQL type
    pub sql_type: String,
    /// NOT NULL constraint present
    pub not_null: bool,
    /// Part of the primary key
    pub primary_key: bool,
}

/// Apply the schema: drop the table if it exists, then create it
///
/// Both statements run in one transaction, so on failure the previous
/// state of the table is left untouched. Dropping a table that does not
/// exist is not an error.
///
/// # Errors
///
/// `Schema` when the backend rejects the DDL.
pub fn apply(conn: &mut Connection, schema: &TableSchema) -> Result<()> {
    let table = schema.name();

    let tx = conn.transaction().map_err(|e| schema_error(table, e))?;

    tx.execute_batch(&format!("DROP TABLE IF EXISTS {}", table))
        .map_err(|e| schema_error(table, e))?;
    tx.execute_batch(&create_table_sql(schema))
        .map_err(|e| schema_error(table, e))?;

    tx.commit().map_err(|e| schema_error(table, e))?;

    tracing::debug!(table, "schema applied");
    Ok(())
}

/// Read the backend's column metadata for a table
///
/// Returns the columns in declared order, for verification that a
/// migration produced exactly the declared schema.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    if !seedbed_core::schema::is_identifier(table) {
        return Err(crate::errors::schema_rejected(
            table,
            "not a valid identifier",
        ));
    }

    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", table))
        .map_err(|e| schema_error(table, e))?;

    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get(1)?,
                sql_type: row.get(2)?,
                not_null: row.get::<_, i32>(3)? != 0,
                primary_key: row.get::<_, i32>(5)? != 0,
            })
        })
        .map_err(|e| schema_error(table, e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| schema_error(table, e))?;

    Ok(columns)
}

/// Render the CREATE TABLE statement for a schema
fn create_table_sql(schema: &TableSchema) -> String {
    let mut defs: Vec<String> = Vec::new();

    for column in schema.columns() {
        match column.kind {
            ColumnKind::PrimaryKey => {
                defs.push(format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", column.name));
            }
            ColumnKind::Text | ColumnKind::Date => {
                // dates are ISO-8601 text
                defs.push(format!(
                    "{} TEXT{}",
                    column.name,
                    if column.nullable { "" } else { " NOT NULL" }
                ));
            }
            ColumnKind::Timestamps => {
                defs.push(format!("{} INTEGER NOT NULL", CREATED_AT));
                defs.push(format!("{} INTEGER NOT NULL", UPDATED_AT));
            }
        }
    }

    format!(
        "CREATE TABLE {} (\n    {}\n)",
        schema.name(),
        defs.join(",\n    ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_sql() {
        let schema = TableSchema::builder("customers")
            .increments("id")
            .string("name")
            .string("firstname")
            .nullable_date("birthdate")
            .timestamps()
            .build()
            .unwrap();

        let sql = create_table_sql(&schema);
        assert!(sql.starts_with("CREATE TABLE customers"));
        assert!(sql.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
        assert!(sql.contains("name TEXT NOT NULL"));
        assert!(sql.contains("firstname TEXT NOT NULL"));
        assert!(sql.contains("birthdate TEXT,"));
        assert!(sql.contains("created_at INTEGER NOT NULL"));
        assert!(sql.contains("updated_at INTEGER NOT NULL"));
    }
}
