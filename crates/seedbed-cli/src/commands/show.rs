//! Show command
//!
//! Usage: seedbed show --db <PATH> [--table NAME]

use clap::Args;
use std::path::PathBuf;

use seedbed_store::db::{self, BackendConfig};
use seedbed_store::query;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Path to an existing store file
    #[arg(long)]
    pub db: PathBuf,

    /// Table to dump
    #[arg(long, default_value = "customers")]
    pub table: String,
}

/// Execute show command
pub fn execute(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Opening would create an empty store at a wrong path; refuse instead
    if !args.db.exists() {
        return Err(format!("no store file at {}", args.db.display()).into());
    }

    let conn = db::open(&BackendConfig::File(args.db.clone()))?;

    let rows = query::fetch_all(&conn, &args.table)?;
    query::render(&args.table, &rows, &mut std::io::stdout())?;

    Ok(())
}
