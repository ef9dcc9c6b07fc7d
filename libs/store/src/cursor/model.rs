use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Provenance record for one ingested block range. Append-only; the
/// `refreshed*` columns belong to a downstream reconciliation job and are
/// only ever written here with their defaults.
#[derive(Clone, Debug, FromRow, PartialEq)]
pub struct LogEntry {
    pub id: i64,
    pub inserted_at: DateTime<Utc>,
    pub contract_address: String,
    pub block_from: i64,
    pub block_to: i64,
    pub transfers_inserted: i64,
    pub transfers_seen: i64,
    pub refreshed: bool,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub refreshed_batch_id: Option<i64>,
}

/// The fields a sweep supplies when appending to the log.
#[derive(Clone, Debug, PartialEq)]
pub struct NewLogEntry {
    pub contract_address: String,
    pub block_from: i64,
    pub block_to: i64,
    pub transfers_inserted: i64,
    pub transfers_seen: i64,
}
