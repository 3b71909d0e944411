use std::collections::HashMap;
use std::time::Duration;

use shared::models::VoteOption;
use sqlx::PgPool;
use tracing::debug;

use crate::store::{StoreError, VoteLedgerStore, bounded};

/// Postgres `votes` table filled by the ledger worker, one row per voter.
pub struct PgLedger {
    pool: PgPool,
    timeout: Duration,
}

impl PgLedger {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unreachable(e.to_string()),
        other => StoreError::Command(other.to_string()),
    }
}

/// Folds `(label, count)` rows into per-option counts. Unknown labels are
/// dropped; counts pass through unchanged.
pub fn counts_from_rows<I>(rows: I) -> HashMap<VoteOption, i64>
where
    I: IntoIterator<Item = (String, i64)>,
{
    let mut counts = HashMap::with_capacity(VoteOption::ALL.len());
    for (label, count) in rows {
        match label.parse::<VoteOption>() {
            Ok(option) => {
                counts.insert(option, count);
            }
            Err(_) => debug!("Ignoring ledger rows for unknown option {:?}", label),
        }
    }
    counts
}

#[rocket::async_trait]
impl VoteLedgerStore for PgLedger {
    async fn count_by_option(&self) -> Result<HashMap<VoteOption, i64>, StoreError> {
        let rows = bounded(self.timeout, async {
            sqlx::query_as::<_, (String, i64)>("SELECT vote, COUNT(*) FROM votes GROUP BY vote")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)
        })
        .await?;

        Ok(counts_from_rows(rows))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        bounded(self.timeout, async {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map(|_| ())
                .map_err(map_sqlx_error)
        })
        .await
    }
}
