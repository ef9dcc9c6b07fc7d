mod cli {
    pub mod cmd;
    pub mod read;
    pub mod worker {
        pub mod args;
        pub mod run;
    }
}

use clap::Parser;
use eyre::Result;

use crate::cli::cmd::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // install global subscriber configured based on RUST_LOG envvar.
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => {
            tracing::info!("Run Command: {args:?}");
            cli::worker::run::run(args).await
        }
        Command::Sweep(args) => {
            tracing::info!("Sweep Command: {args:?}");
            cli::worker::run::sweep_once(args).await
        }
    }
}
