use eyre::{Result, WrapErr};
use store::cursor::model::NewLogEntry;
use store::cursor::store::Store as CursorStore;
use store::ledger::store::Store as LedgerStore;

use crate::clock::Clock;
use crate::config::Config;
use crate::normalize;
use crate::source::TransferSource;

#[derive(Debug, PartialEq)]
pub enum SweepOutcome {
    /// Frontier reached; every range up to it is logged.
    Drained(SweepReport),
    /// The contract has no transfer history yet; nothing to do.
    NoHistory,
}

#[derive(Debug, Default, PartialEq)]
pub struct SweepReport {
    pub ranges_logged: u64,
    pub transfers_seen: u64,
    pub transfers_inserted: u64,
    /// The chain height observed when the sweep last checked it.
    pub frontier: u64,
}

/// One sweep from the resolved start block to the current chain frontier.
///
/// Any fetch or store failure aborts the sweep with partial progress kept:
/// every range already appended to the ingestion log stays covered, and the
/// next sweep resumes right after it. The caller decides when to retry.
pub async fn run_sweep(
    config: &Config,
    source: &dyn TransferSource,
    ledger: &LedgerStore,
    cursor: &CursorStore,
    clock: &dyn Clock,
) -> Result<SweepOutcome> {
    let contract = config.contract_address.as_str();

    let mut start_block = match resolve_start(contract, source, cursor).await? {
        Some(block) => block,
        None => {
            tracing::info!(contract, "no transfer history yet, nothing to ingest");
            return Ok(SweepOutcome::NoHistory);
        }
    };

    tracing::info!(contract, start_block, "sweep started");

    let mut report = SweepReport::default();

    loop {
        // Re-read the frontier every iteration; it may have grown while the
        // previous range was draining.
        let current_block =
            source.current_block().await.wrap_err("failed to fetch current block")?;
        report.frontier = current_block;

        if start_block > current_block {
            tracing::info!(contract, frontier = current_block, "frontier reached");
            return Ok(SweepOutcome::Drained(report));
        }

        let end_block = start_block.saturating_add(config.range_size - 1).min(current_block);

        let page = source.transfer_page(contract, start_block, end_block).await.wrap_err_with(
            || format!("fetching transfers for blocks {start_block}-{end_block} of {contract}"),
        )?;

        let seen = page.len() as u64;
        let mut inserted = 0u64;
        for raw in &page {
            match normalize::to_record(contract, raw) {
                Ok(record) => {
                    let written =
                        ledger.insert_if_absent(&record).await.wrap_err_with(|| {
                            format!("persisting transfer {} of {contract}", record.tx_hash)
                        })?;
                    if written {
                        inserted += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(contract, tx_hash = %raw.hash, "skipping malformed transfer entry: {e:#}");
                }
            }
        }

        // Logged even when the range was empty; the log is the proof of
        // coverage that resumption is built on.
        let entry = NewLogEntry {
            contract_address: contract.to_string(),
            block_from: start_block as i64,
            block_to: end_block as i64,
            transfers_inserted: inserted as i64,
            transfers_seen: seen as i64,
        };
        let log_id = cursor
            .append_log(&entry, clock.now())
            .await
            .wrap_err_with(|| format!("logging blocks {start_block}-{end_block} of {contract}"))?;

        tracing::info!(
            contract,
            log_id,
            block_from = start_block,
            block_to = end_block,
            seen,
            inserted,
            "range logged"
        );

        report.ranges_logged += 1;
        report.transfers_seen += seen;
        report.transfers_inserted += inserted;

        start_block = end_block + 1;
    }
}

async fn resolve_start(
    contract: &str,
    source: &dyn TransferSource,
    cursor: &CursorStore,
) -> Result<Option<u64>> {
    if let Some((_, block_to)) = cursor
        .last_logged_range(contract)
        .await
        .wrap_err("failed to read the ingestion log")?
    {
        // Resume past the furthest logged range. The dedup index would absorb
        // an overlap, but re-fetching a range already proven covered buys
        // nothing.
        return Ok(Some(block_to + 1));
    }

    source
        .first_transfer_block(contract)
        .await
        .wrap_err_with(|| format!("failed to look up the first transfer block of {contract}"))
}
