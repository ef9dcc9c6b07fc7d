use std::sync::Arc;

use engine::clock::SystemClock;
use engine::config::Config;
use engine::scheduler::Scheduler;
use engine::source::{ExplorerSource, TransferSource};
use engine::sweep;
use eyre::Result;
use store::client::Client;
use store::cursor::store::Store as CursorStore;
use store::ledger::store::Store as LedgerStore;

use crate::cli::read;
use crate::cli::worker::args::Args;

/// Scheduler mode: sweep whenever the refresh threshold allows, forever.
pub async fn run(args: Args) -> Result<()> {
    let (config, source, ledger, cursor) = build(&args).await?;

    let scheduler = Scheduler::new(
        config,
        Arc::new(source) as Arc<dyn TransferSource>,
        ledger,
        cursor,
        Arc::new(SystemClock),
    );

    tracing::info!("Starting the ingestion worker");

    // Run until the user requests shutdown (SIGINT)
    tokio::select! {
        _ = scheduler.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down worker...");
        }
    }

    Ok(())
}

/// One-shot mode: a single sweep to the current frontier, then exit.
pub async fn sweep_once(args: Args) -> Result<()> {
    let (config, source, ledger, cursor) = build(&args).await?;

    let outcome = sweep::run_sweep(&config, &source, &ledger, &cursor, &SystemClock).await?;
    tracing::info!("Sweep finished: {outcome:?}");

    Ok(())
}

async fn build(args: &Args) -> Result<(Config, ExplorerSource, LedgerStore, CursorStore)> {
    let api_key = read::load_api_key(&args.api_key_file)?;
    let contract_address = read::parse_contract(&args.contract)?;

    let source = ExplorerSource { client: explorer::client::Client::new(&args.api_url, &api_key)? };

    let client = Client::init(&args.db_url).await?;
    let ledger = LedgerStore::new(client.clone());
    let cursor = CursorStore::new(client);

    let config = Config {
        contract_address,
        range_size: args.range_size,
        refresh_threshold_minutes: args.refresh_threshold,
        retry_interval_minutes: args.retry_interval,
    };

    Ok((config, source, ledger, cursor))
}
