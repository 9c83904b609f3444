//! One-shot fixture provisioning pipeline
//!
//! Sequences schema migration and seeding over an explicit connection.
//! There is no retry or resumption: the pipeline runs once, linearly.

use rusqlite::Connection;

use seedbed_core::schema::TableSchema;

use crate::datagen::RecordGenerator;
use crate::errors::Result;
use crate::seed::SeedReport;
use crate::{migrate, seed};

/// Migrate the schema, then seed it with generated records
///
/// The connection belongs to the caller: open it with `db::open` and
/// reuse the same handle for any later reads, since in-memory stores are
/// per-handle. Migration failures abort the run; per-record seeding
/// failures are reported in the returned `SeedReport`.
///
/// # Errors
///
/// `Schema` when migration fails; the table is left as it was.
pub fn run(
    conn: &mut Connection,
    schema: &TableSchema,
    count: usize,
    rng_seed: Option<u64>,
) -> Result<SeedReport> {
    tracing::info!(table = schema.name(), count, "provisioning fixture");

    migrate::apply(conn, schema)?;

    let mut generator = RecordGenerator::new(rng_seed);
    let report = seed::run(conn, schema, &mut generator, count);

    Ok(report)
}
