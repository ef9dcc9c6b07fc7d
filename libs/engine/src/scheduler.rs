use std::sync::Arc;

use store::cursor::store::Store as CursorStore;
use store::ledger::store::Store as LedgerStore;

use crate::clock::Clock;
use crate::config::Config;
use crate::source::TransferSource;
use crate::sweep::{self, SweepOutcome, SweepReport};

#[derive(Debug, PartialEq)]
pub enum CycleOutcome {
    /// Refresh threshold not met; no work attempted this wake-up.
    Skipped { minutes_since_refresh: i64 },
    /// A sweep drained to the frontier and the refresh cursor advanced.
    Completed(SweepReport),
    /// The contract has no transfer history yet.
    NoHistory,
    /// The sweep or a store call failed; details are logged, partial
    /// progress is durable, the next wake-up resumes from the log.
    Failed,
}

/// Outer control loop: wakes up on a fixed interval, runs a sweep when the
/// contract's refresh is due, and never lets a failed sweep take the
/// process down.
pub struct Scheduler {
    config: Config,
    source: Arc<dyn TransferSource>,
    ledger: LedgerStore,
    cursor: CursorStore,
    clock: Arc<dyn Clock>,
}

impl Scheduler {
    pub fn new(
        config: Config,
        source: Arc<dyn TransferSource>,
        ledger: LedgerStore,
        cursor: CursorStore,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { config, source, ledger, cursor, clock }
    }

    /// Runs until the process is terminated. Sleeps the full retry interval
    /// after every cycle, worked or not.
    pub async fn run(&self) {
        loop {
            self.run_cycle().await;
            self.clock.sleep(self.config.retry_interval()).await;
        }
    }

    pub async fn run_cycle(&self) -> CycleOutcome {
        let contract = self.config.contract_address.as_str();

        let minutes = match self
            .cursor
            .minutes_since_last_refresh(contract, self.clock.now())
            .await
        {
            Ok(minutes) => minutes,
            Err(e) => {
                tracing::error!(contract, "failed to read the refresh cursor: {e:#}");
                return CycleOutcome::Failed;
            }
        };

        // No refresh record means the contract was never swept: due now.
        if let Some(minutes_since_refresh) = minutes {
            if minutes_since_refresh < self.config.refresh_threshold_minutes {
                tracing::info!(
                    contract,
                    minutes_since_refresh,
                    threshold = self.config.refresh_threshold_minutes,
                    "refresh threshold not met, skipping this cycle"
                );
                return CycleOutcome::Skipped { minutes_since_refresh };
            }
        }

        let outcome = sweep::run_sweep(
            &self.config,
            self.source.as_ref(),
            &self.ledger,
            &self.cursor,
            self.clock.as_ref(),
        )
        .await;

        match outcome {
            Ok(SweepOutcome::Drained(report)) => {
                if let Err(e) = self.cursor.mark_refreshed(contract, self.clock.now()).await {
                    tracing::error!(contract, "sweep drained but marking the refresh failed: {e:#}");
                    return CycleOutcome::Failed;
                }
                tracing::info!(
                    contract,
                    frontier = report.frontier,
                    ranges = report.ranges_logged,
                    seen = report.transfers_seen,
                    inserted = report.transfers_inserted,
                    "sweep drained to frontier"
                );
                CycleOutcome::Completed(report)
            }
            Ok(SweepOutcome::NoHistory) => CycleOutcome::NoHistory,
            Err(e) => {
                tracing::error!(contract, "sweep aborted: {e:#}");
                CycleOutcome::Failed
            }
        }
    }
}
