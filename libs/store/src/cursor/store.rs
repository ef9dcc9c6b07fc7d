use chrono::{DateTime, Utc};
use sqlx::Error;

use crate::client::Client;
use crate::cursor::model::{LogEntry, NewLogEntry};

#[derive(Clone)]
pub struct Store {
    client: Client,
}

impl Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    // ---------------------------
    // INGESTION LOG
    // ---------------------------

    /// Append one entry, even for an empty range; the log is the durable
    /// proof that a range was checked. Returns the new entry's id.
    pub async fn append_log(
        &self,
        entry: &NewLogEntry,
        inserted_at: DateTime<Utc>,
    ) -> Result<i64, Error> {
        let query = r#"
            INSERT INTO ingestion_logs (
                inserted_at, contract_address, block_from, block_to,
                transfers_inserted, transfers_seen, refreshed, refreshed_at, refreshed_batch_id
            )
            VALUES (?, ?, ?, ?, ?, ?, 0, NULL, NULL)
            "#;
        let result = sqlx::query(query)
            .bind(inserted_at)
            .bind(&entry.contract_address)
            .bind(entry.block_from)
            .bind(entry.block_to)
            .bind(entry.transfers_inserted)
            .bind(entry.transfers_seen)
            .execute(self.client.pool())
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// The `(block_from, block_to)` of the furthest logged range for the
    /// contract; `None` means it was never ingested. Sweeps resume from
    /// `block_to + 1`.
    pub async fn last_logged_range(
        &self,
        contract_address: &str,
    ) -> Result<Option<(u64, u64)>, Error> {
        let query = r#"
            SELECT block_from, block_to
            FROM ingestion_logs
            WHERE contract_address = ?
            ORDER BY block_from DESC
            LIMIT 1
            "#;
        let range: Option<(i64, i64)> = sqlx::query_as(query)
            .bind(contract_address)
            .fetch_optional(self.client.pool())
            .await?;

        Ok(range.map(|(from, to)| (from as u64, to as u64)))
    }

    pub async fn logs_for_contract(
        &self,
        contract_address: &str,
    ) -> Result<Vec<LogEntry>, Error> {
        let query = r#"
            SELECT
                id, inserted_at, contract_address, block_from, block_to,
                transfers_inserted, transfers_seen, refreshed, refreshed_at, refreshed_batch_id
            FROM ingestion_logs
            WHERE contract_address = ?
            ORDER BY block_from ASC
            "#;
        let entries = sqlx::query_as(query)
            .bind(contract_address)
            .fetch_all(self.client.pool())
            .await?;

        Ok(entries)
    }

    // ---------------------------
    // REFRESH CURSOR
    // ---------------------------

    /// Whole minutes since the contract's last completed sweep; `None` when
    /// no refresh was ever recorded (the scheduler treats that as due).
    pub async fn minutes_since_last_refresh(
        &self,
        contract_address: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<i64>, Error> {
        let query = r#"
            SELECT last_refresh
            FROM contracts
            WHERE contract_address = ?
            "#;
        let row: Option<(Option<DateTime<Utc>>,)> = sqlx::query_as(query)
            .bind(contract_address)
            .fetch_optional(self.client.pool())
            .await?;

        Ok(row.and_then(|(last_refresh,)| last_refresh).map(|last| (now - last).num_minutes()))
    }

    /// Record a completed sweep. `last_refresh` only ever moves forward.
    pub async fn mark_refreshed(
        &self,
        contract_address: &str,
        at: DateTime<Utc>,
    ) -> Result<(), Error> {
        let query = r#"
            INSERT INTO contracts (contract_address, last_refresh)
            VALUES (?, ?)
            ON CONFLICT (contract_address) DO UPDATE
            SET last_refresh = excluded.last_refresh
            WHERE contracts.last_refresh IS NULL
               OR excluded.last_refresh > contracts.last_refresh
            "#;
        sqlx::query(query)
            .bind(contract_address)
            .bind(at)
            .execute(self.client.pool())
            .await?;

        Ok(())
    }
}
