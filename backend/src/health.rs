use std::sync::Arc;
use std::time::Duration;

use shared::models::HealthReport;
use tracing::warn;

use crate::store::{VoteLedgerStore, VoteQueueStore, bounded};

/// Liveness of each store, probed independently of the data paths.
pub struct HealthProbe {
    queue: Arc<dyn VoteQueueStore>,
    ledger: Arc<dyn VoteLedgerStore>,
    timeout: Duration,
}

impl HealthProbe {
    pub fn new(queue: Arc<dyn VoteQueueStore>, ledger: Arc<dyn VoteLedgerStore>, timeout: Duration) -> Self {
        Self { queue, ledger, timeout }
    }

    pub async fn check(&self) -> HealthReport {
        let (queue, ledger) = futures::join!(
            bounded(self.timeout, self.queue.ping()),
            bounded(self.timeout, self.ledger.ping()),
        );

        if let Err(e) = &queue {
            warn!("Queue store probe failed: {}", e);
        }
        if let Err(e) = &ledger {
            warn!("Ledger store probe failed: {}", e);
        }

        HealthReport {
            queue_reachable: queue.is_ok(),
            ledger_reachable: ledger.is_ok(),
        }
    }
}
