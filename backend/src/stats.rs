use std::sync::Arc;
use std::time::Duration;

use shared::models::{TallySnapshot, TallySource, VoteOption};
use shared::validation::decode_queued_vote;
use tracing::{debug, error, warn};

use crate::store::{StoreError, VoteLedgerStore, VoteQueueStore, bounded};

/// Where a tally may be read from, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStrategy {
    Ledger,
    Queue,
}

impl ReadStrategy {
    pub const PRIORITY: [ReadStrategy; 2] = [ReadStrategy::Ledger, ReadStrategy::Queue];

    pub fn source(self) -> TallySource {
        match self {
            ReadStrategy::Ledger => TallySource::Ledger,
            ReadStrategy::Queue => TallySource::Queue,
        }
    }
}

/// Ledger-first tally with queue fallback.
///
/// Exactly one source answers per call; ledger and queue counts are never
/// added together. Each read is bounded by `timeout` and an elapsed read
/// falls through to the next strategy.
pub struct StatsAggregator {
    ledger: Arc<dyn VoteLedgerStore>,
    queue: Arc<dyn VoteQueueStore>,
    timeout: Duration,
}

impl StatsAggregator {
    pub fn new(ledger: Arc<dyn VoteLedgerStore>, queue: Arc<dyn VoteQueueStore>, timeout: Duration) -> Self {
        Self { ledger, queue, timeout }
    }

    pub async fn compute_tally(&self) -> TallySnapshot {
        for strategy in ReadStrategy::PRIORITY {
            match self.read(strategy).await {
                Ok(tally) => return tally,
                Err(e) => warn!("Could not get stats from {:?}: {}", strategy, e),
            }
        }

        error!("No vote store reachable, reporting empty tally");
        TallySnapshot::unavailable()
    }

    async fn read(&self, strategy: ReadStrategy) -> Result<TallySnapshot, StoreError> {
        match strategy {
            ReadStrategy::Ledger => bounded(self.timeout, self.read_ledger()).await,
            ReadStrategy::Queue => bounded(self.timeout, self.read_queue()).await,
        }
    }

    async fn read_ledger(&self) -> Result<TallySnapshot, StoreError> {
        let counts = self.ledger.count_by_option().await?;
        let count = |option: VoteOption| {
            counts
                .get(&option)
                .copied()
                .and_then(|n| u64::try_from(n).ok())
                .unwrap_or(0)
        };

        Ok(TallySnapshot::new(
            count(VoteOption::A),
            count(VoteOption::B),
            ReadStrategy::Ledger.source(),
        ))
    }

    async fn read_queue(&self) -> Result<TallySnapshot, StoreError> {
        let entries = self.queue.read_all().await?;
        Ok(tally_entries(&entries))
    }
}

/// Counts raw queue entries by option, skipping anything that fails the
/// strict decode.
pub fn tally_entries(entries: &[Vec<u8>]) -> TallySnapshot {
    let (mut count_a, mut count_b, mut skipped) = (0u64, 0u64, 0usize);

    for entry in entries {
        match decode_queued_vote(entry) {
            Ok(queued) => match queued.vote {
                VoteOption::A => count_a += 1,
                VoteOption::B => count_b += 1,
            },
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} malformed queue entries", skipped);
    }

    TallySnapshot::new(count_a, count_b, ReadStrategy::Queue.source())
}
