//! Read-only row retrieval and diagnostic rendering
//!
//! Used for verification output after a provisioning run; nothing here
//! mutates the store.

use std::io::{self, Write};

use rusqlite::types::ValueRef;
use rusqlite::Connection;

use seedbed_core::record::{Record, Value};
use seedbed_core::schema::is_identifier;

use crate::errors::{read_error, read_rejected, Result};

/// Fetch all rows of a table
///
/// Columns are mapped dynamically from the backend's types, so no schema
/// is needed. Row order is whatever the backend returns; no ordering is
/// guaranteed.
///
/// # Errors
///
/// `Read` when the table name is not a valid identifier or the query
/// fails (e.g. the table does not exist).
pub fn fetch_all(conn: &Connection, table: &str) -> Result<Vec<Record>> {
    if !is_identifier(table) {
        return Err(read_rejected(table, "not a valid identifier"));
    }

    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {}", table))
        .map_err(|e| read_error(table, e))?;

    let column_names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let rows = stmt
        .query_map([], |row| {
            let mut record = Record::new();
            for (idx, name) in column_names.iter().enumerate() {
                let value = match row.get_ref(idx)? {
                    ValueRef::Null => Value::Null,
                    ValueRef::Integer(i) => Value::Integer(i),
                    ValueRef::Real(f) => Value::Real(f),
                    ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
                    ValueRef::Blob(_) => Value::Null,
                };
                record.push(name.clone(), value);
            }
            Ok(record)
        })
        .map_err(|e| read_error(table, e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| read_error(table, e))?;

    Ok(rows)
}

/// Render rows as a diagnostic dump
///
/// Writes a header line, one JSON object per row, and a row-count
/// trailer.
pub fn render<W: Write>(table: &str, rows: &[Record], out: &mut W) -> io::Result<()> {
    let header = format!("Contents of table '{}'", table);
    writeln!(out, "{}", header)?;
    writeln!(out, "{}", "-".repeat(header.len()))?;

    for row in rows {
        let line = serde_json::to_string(row).unwrap_or_else(|_| "{}".to_string());
        writeln!(out, "{}", line)?;
    }

    writeln!(out, "({} rows)", rows.len())?;
    Ok(())
}
