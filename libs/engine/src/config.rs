use std::time::Duration;

/// Worker configuration, passed into the scheduler at construction. One
/// worker tracks one contract; run more workers for more contracts.
#[derive(Clone, Debug)]
pub struct Config {
    pub contract_address: String,
    /// Blocks covered per page request.
    pub range_size: u64,
    /// Minimum minutes since the last completed sweep before ingesting again.
    pub refresh_threshold_minutes: i64,
    /// Minutes the scheduler sleeps between wake-ups, worked or not.
    pub retry_interval_minutes: u64,
}

impl Config {
    pub fn new(contract_address: impl Into<String>) -> Self {
        Self {
            contract_address: contract_address.into(),
            range_size: 1000,
            refresh_threshold_minutes: 15,
            retry_interval_minutes: 10,
        }
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_minutes * 60)
    }
}
