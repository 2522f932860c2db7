use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

/// Closed set of failure kinds at the sync boundary.
///
/// Every variant is fatal: a single failed request or malformed record
/// aborts the run rather than silently skipping data.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
