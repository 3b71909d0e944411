//! # Redis
//!
//! Queue store for freshly submitted votes.
//!
//! - One Redis list (default key `votes`), `RPUSH` on submit, `LRANGE 0 -1` for the fallback tally
//! - The ledger worker pops entries off the same list, so the list stays short in steady state
//! - A multiplexed connection is opened per call and dropped when the call returns, so a broken
//!   socket never outlives the request that saw it
use std::time::Duration;

use redis::{AsyncCommands, Client, RedisError, aio::MultiplexedConnection};
use tracing::debug;

use crate::store::{StoreError, VoteQueueStore, bounded};

pub struct RedisQueue {
    client: Client,
    key: String,
    timeout: Duration,
}

impl RedisQueue {
    pub fn open(redis_url: &str, key: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::open(redis_url).map_err(|e| StoreError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            key: key.into(),
            timeout,
        })
    }

    async fn connect(&self) -> Result<MultiplexedConnection, StoreError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)
    }
}

fn map_redis_error(e: RedisError) -> StoreError {
    if e.is_connection_refusal() || e.is_io_error() || e.is_connection_dropped() {
        StoreError::Unreachable(e.to_string())
    } else if e.is_timeout() {
        StoreError::Unreachable(format!("timed out: {e}"))
    } else {
        StoreError::Command(e.to_string())
    }
}

#[rocket::async_trait]
impl VoteQueueStore for RedisQueue {
    async fn append(&self, payload: &[u8]) -> Result<(), StoreError> {
        bounded(self.timeout, async {
            let mut conn = self.connect().await?;
            let length: i64 = conn.rpush(&self.key, payload).await.map_err(map_redis_error)?;
            debug!("Queue {} now holds {} entries", self.key, length);
            Ok(())
        })
        .await
    }

    async fn read_all(&self) -> Result<Vec<Vec<u8>>, StoreError> {
        bounded(self.timeout, async {
            let mut conn = self.connect().await?;
            conn.lrange(&self.key, 0, -1).await.map_err(map_redis_error)
        })
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        bounded(self.timeout, async {
            let mut conn = self.connect().await?;
            let _: String = redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(map_redis_error)?;
            Ok(())
        })
        .await
    }
}
