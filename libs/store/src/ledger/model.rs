use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// An immutable transfer fact. Rows sharing the uniqueness key
/// `(tx_hash, occurred_at, block_number, from_address, to_address, amount)`
/// are never written twice; collisions are skipped, not overwritten.
#[derive(Clone, Debug, FromRow, PartialEq)]
pub struct TransferRecord {
    pub contract_address: String,
    pub tx_hash: String,
    pub occurred_at: DateTime<Utc>,
    pub block_number: i64,
    pub from_address: String,
    pub to_address: String,
    /// Canonical decimal rendering of the scaled amount. Kept as TEXT so no
    /// precision is lost between normalization and storage.
    pub amount: String,
}
