use thiserror::Error;

/// Failures surfaced by the explorer API. The scheduler treats every variant
/// as retryable on its next wake-up; only the current sweep is abandoned.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error talking to the explorer: {0}")]
    Transient(#[from] reqwest::Error),

    #[error("explorer rejected the query: {message}")]
    Upstream { message: String },

    #[error("unexpected explorer payload: {0}")]
    InvalidPayload(String),
}
