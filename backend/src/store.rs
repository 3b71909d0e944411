use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use shared::models::VoteOption;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unreachable: {0}")]
    Unreachable(String),
    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),
    #[error("Store command failed: {0}")]
    Command(String),
}

/// Fast, volatile, append-only list of pending vote payloads.
#[rocket::async_trait]
pub trait VoteQueueStore: Send + Sync {
    async fn append(&self, payload: &[u8]) -> Result<(), StoreError>;

    async fn read_all(&self) -> Result<Vec<Vec<u8>>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Durable, deduplicated vote table. Authoritative when reachable.
#[rocket::async_trait]
pub trait VoteLedgerStore: Send + Sync {
    /// Grouped count per option. Options with no rows may be absent.
    async fn count_by_option(&self) -> Result<HashMap<VoteOption, i64>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Runs a store call under `limit`. An elapsed timer is a store failure.
pub async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
}
