use sqlx::Error;

use crate::client::Client;
use crate::ledger::model::TransferRecord;

#[derive(Clone)]
pub struct Store {
    client: Client,
}

impl Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    // ---------------------------
    // TRANSFER RECORDS
    // ---------------------------

    /// Insert unless a row with the same uniqueness key already exists.
    /// Returns whether a row was written. The unique index makes the
    /// check-and-insert a single atomic statement.
    pub async fn insert_if_absent(&self, record: &TransferRecord) -> Result<bool, Error> {
        let query = r#"
            INSERT OR IGNORE INTO transfers (
                contract_address, tx_hash, occurred_at, block_number,
                from_address, to_address, amount
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#;

        let result = sqlx::query(query)
            .bind(&record.contract_address)
            .bind(&record.tx_hash)
            .bind(record.occurred_at)
            .bind(record.block_number)
            .bind(&record.from_address)
            .bind(&record.to_address)
            .bind(&record.amount)
            .execute(self.client.pool())
            .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn transfers_between_blocks(
        &self,
        contract_address: &str,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<TransferRecord>, Error> {
        let query = r#"
            SELECT
                contract_address, tx_hash, occurred_at, block_number,
                from_address, to_address, amount
            FROM transfers
            WHERE contract_address = ? AND block_number BETWEEN ? AND ?
            ORDER BY block_number ASC, tx_hash ASC
            "#;
        let records = sqlx::query_as(query)
            .bind(contract_address)
            .bind(from_block as i64)
            .bind(to_block as i64)
            .fetch_all(self.client.pool())
            .await?;

        Ok(records)
    }
}
