//! Seedbed Core - domain model for fixture provisioning
//!
//! Provides:
//! - Table schema descriptors with a typed builder
//! - Records and record-vs-schema validation
//! - The error facility shared by all seedbed crates
//! - The logging facility (tracing subscriber initialization)

pub mod errors;
pub mod logging;
pub mod record;
pub mod schema;

// Re-export key types
pub use errors::{ProvisionError, Result};
pub use record::{Record, Value};
pub use schema::{Column, ColumnKind, TableSchema};
