use clap::command;
use clap::{Parser, Subcommand};

use super::worker::args::Args;

#[derive(Parser, Debug)]
#[command(name = "transfer-worker")]
#[command(about = "Polling ingestion worker for token transfer history", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the scheduler loop until terminated
    Run(Args),
    /// Run a single sweep to the current frontier and exit
    Sweep(Args),
}
