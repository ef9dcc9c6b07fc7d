use std::path::PathBuf;

use clap::Parser;
use clap::{arg, command};

#[derive(Parser, Debug)]
#[command(about = "Ingest token transfers for a contract", long_about = None)]
pub struct Args {
    /// SQLite connection string
    #[arg(short, long)]
    pub db_url: String,

    /// Token contract address (0x-prefixed)
    #[arg(short, long)]
    pub contract: String,

    /// Explorer API base URL
    #[arg(long, default_value = "https://api.etherscan.io/api")]
    pub api_url: String,

    /// File holding the explorer API key
    #[arg(long, default_value = "api_key.txt")]
    pub api_key_file: PathBuf,

    /// Blocks per page request
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub range_size: u64,

    /// Minimum minutes since the last refresh before ingesting again
    #[arg(long, default_value_t = 15)]
    pub refresh_threshold: i64,

    /// Minutes to sleep between scheduler wake-ups
    #[arg(long, default_value_t = 10)]
    pub retry_interval: u64,
}
