//! Provision command
//!
//! Usage: seedbed provision [--db PATH] [--count N] [--rng-seed S] [--table NAME]

use clap::Args;
use std::path::PathBuf;

use seedbed_core::schema::TableSchema;
use seedbed_store::db::{self, BackendConfig};
use seedbed_store::{provision, query};

#[derive(Debug, Args)]
pub struct ProvisionArgs {
    /// Path to the store file; provisions an in-memory store when omitted
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Seeding bound; inserts count + 1 records (the loop runs 0..=count)
    #[arg(long, default_value_t = 100)]
    pub count: usize,

    /// Fix the generator RNG seed for reproducible data
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// Name of the provisioned table
    #[arg(long, default_value = "customers")]
    pub table: String,
}

/// Execute provision command
pub fn execute(args: ProvisionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.db {
        Some(path) => BackendConfig::File(path.clone()),
        None => BackendConfig::InMemory,
    };

    let mut conn = db::open(&config)?;
    db::configure(&conn, &config)?;

    let schema = sample_schema(&args.table)?;
    let report = provision::run(&mut conn, &schema, args.count, args.rng_seed)?;

    println!(
        "Seeded table '{}': {} of {} records inserted",
        schema.name(),
        report.inserted,
        report.attempted
    );
    if let Some(err) = &report.first_error {
        println!("First rejected record: {}", err);
    }

    println!();
    let rows = query::fetch_all(&conn, schema.name())?;
    query::render(schema.name(), &rows, &mut std::io::stdout())?;

    Ok(())
}

/// The demo schema: an auto-increment id, two name columns, a nullable
/// birthdate, and a timestamp pair
fn sample_schema(table: &str) -> seedbed_core::Result<TableSchema> {
    TableSchema::builder(table)
        .increments("id")
        .string("name")
        .string("firstname")
        .nullable_date("birthdate")
        .timestamps()
        .build()
}
