//! Error handling for seedbed-store
//!
//! Wraps seedbed-core ProvisionError with store-specific helpers

use seedbed_core::errors::ProvisionError;

pub use seedbed_core::errors::Result;

/// Create a connection error from rusqlite::Error
pub fn connection_error(err: rusqlite::Error) -> ProvisionError {
    ProvisionError::Connection {
        message: err.to_string(),
    }
}

/// Create a schema error for a table from rusqlite::Error
pub fn schema_error(table: &str, err: rusqlite::Error) -> ProvisionError {
    ProvisionError::Schema {
        table: table.to_string(),
        message: err.to_string(),
    }
}

/// Create a schema error for a table with a plain reason
pub fn schema_rejected(table: &str, reason: &str) -> ProvisionError {
    ProvisionError::Schema {
        table: table.to_string(),
        message: reason.to_string(),
    }
}

/// Create a write error for a table from rusqlite::Error
pub fn write_error(table: &str, err: rusqlite::Error) -> ProvisionError {
    ProvisionError::Write {
        table: table.to_string(),
        message: err.to_string(),
    }
}

/// Create a read error for a table from rusqlite::Error
pub fn read_error(table: &str, err: rusqlite::Error) -> ProvisionError {
    ProvisionError::Read {
        table: table.to_string(),
        message: err.to_string(),
    }
}

/// Create a read error for a table with a plain reason
pub fn read_rejected(table: &str, reason: &str) -> ProvisionError {
    ProvisionError::Read {
        table: table.to_string(),
        message: reason.to_string(),
    }
}
