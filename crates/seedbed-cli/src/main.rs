//! Seedbed CLI
//!
//! Command-line interface for fixture provisioning

use clap::{Parser, Subcommand};
use seedbed_core::logging::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "seedbed")]
#[command(about = "Seedbed - embedded test-fixture provisioning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Provision a store (migrate + seed) and dump its rows
    Provision(commands::provision::ProvisionArgs),
    /// Dump the rows of an existing store
    Show(commands::show::ShowArgs),
}

fn main() {
    init(Profile::Development);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Provision(args) => commands::provision::execute(args),
        Commands::Show(args) => commands::show::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
