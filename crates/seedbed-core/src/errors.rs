use thiserror::Error;

/// Result type alias using ProvisionError
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Error taxonomy for the provisioning pipeline
///
/// Each variant maps to a stable error code that can be used for
/// programmatic handling and test assertions. Connection, schema, and
/// descriptor errors are fatal to a provisioning run; write errors are
/// recoverable and accumulated per record; read errors are fatal to the
/// diagnostic step only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProvisionError {
    /// Backend could not be reached or initialized
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// DDL was rejected by the backend
    #[error("schema migration failed for table '{table}': {message}")]
    Schema { table: String, message: String },

    /// Descriptor violates a structural invariant
    #[error("invalid schema descriptor: {reason}")]
    InvalidDescriptor { reason: String },

    /// A single insert was rejected
    #[error("write rejected for table '{table}': {message}")]
    Write { table: String, message: String },

    /// Read-back query failed
    #[error("query failed on table '{table}': {message}")]
    Read { table: String, message: String },
}

impl ProvisionError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ProvisionError::Connection { .. } => "ERR_CONNECTION",
            ProvisionError::Schema { .. } => "ERR_SCHEMA",
            ProvisionError::InvalidDescriptor { .. } => "ERR_INVALID_DESCRIPTOR",
            ProvisionError::Write { .. } => "ERR_WRITE",
            ProvisionError::Read { .. } => "ERR_READ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let err = ProvisionError::Connection {
            message: "no such file".to_string(),
        };
        assert_eq!(err.code(), "ERR_CONNECTION");

        let err = ProvisionError::Write {
            table: "customers".to_string(),
            message: "NOT NULL constraint failed".to_string(),
        };
        assert_eq!(err.code(), "ERR_WRITE");
    }

    #[test]
    fn test_display_includes_context() {
        let err = ProvisionError::Schema {
            table: "customers".to_string(),
            message: "near \"TABEL\": syntax error".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("customers"));
        assert!(rendered.contains("syntax error"));
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            ProvisionError::Connection {
                message: String::new(),
            }
            .code(),
            ProvisionError::Schema {
                table: String::new(),
                message: String::new(),
            }
            .code(),
            ProvisionError::InvalidDescriptor {
                reason: String::new(),
            }
            .code(),
            ProvisionError::Write {
                table: String::new(),
                message: String::new(),
            }
            .code(),
            ProvisionError::Read {
                table: String::new(),
                message: String::new(),
            }
            .code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
