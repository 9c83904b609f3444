//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

use crate::errors::{connection_error, Result};
use rusqlite::Connection;
use std::path::PathBuf;

/// Storage backend selection for a provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// Transient in-memory store
    InMemory,
    /// File-backed store at the given path
    File(PathBuf),
}

/// Open a connection to the configured backend
///
/// Every `InMemory` open yields an independent empty store; callers that
/// need a shared store must reuse the returned handle rather than opening
/// again.
///
/// # Errors
///
/// `Connection` when the backend cannot be reached or initialized (e.g.
/// the parent directory of a file-backed store does not exist).
pub fn open(config: &BackendConfig) -> Result<Connection> {
    match config {
        BackendConfig::InMemory => Connection::open_in_memory().map_err(connection_error),
        BackendConfig::File(path) => Connection::open(path).map_err(connection_error),
    }
}

/// Configure a connection with the standard settings
///
/// Enables foreign keys; file-backed stores additionally get WAL mode.
pub fn configure(conn: &Connection, config: &BackendConfig) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .map_err(connection_error)?;

    if let BackendConfig::File(_) = config {
        // journal_mode returns the resulting mode as a row
        conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
            .map_err(connection_error)?;
    }

    Ok(())
}
