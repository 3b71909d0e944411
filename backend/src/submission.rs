use std::sync::Arc;
use std::time::Duration;

use shared::models::VoteRecord;
use shared::validation::parse_vote_option;
use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::error::SubmissionError;
use crate::store::{VoteQueueStore, bounded};

/// Validates a vote and appends it to the queue store.
///
/// Repeat votes from one voter are accepted; each valid call appends a new
/// record. Deduplication, if any, happens downstream in the ledger.
pub struct VoteSubmission {
    queue: Arc<dyn VoteQueueStore>,
    timeout: Duration,
}

impl VoteSubmission {
    pub fn new(queue: Arc<dyn VoteQueueStore>, timeout: Duration) -> Self {
        Self { queue, timeout }
    }

    pub async fn submit(
        &self,
        option: &str,
        voter_id: &str,
        now: OffsetDateTime,
    ) -> Result<VoteRecord, SubmissionError> {
        let vote = parse_vote_option(option).map_err(|_| {
            warn!("Rejected vote with invalid option {:?} from {}", option, voter_id);
            SubmissionError::InvalidOption(option.to_string())
        })?;

        let record = VoteRecord::new(voter_id, vote, now);
        let payload = record
            .to_payload()
            .map_err(|e| SubmissionError::Encode(e.to_string()))?;

        if let Err(e) = bounded(self.timeout, self.queue.append(&payload)).await {
            error!("Error recording vote from {}: {}", voter_id, e);
            return Err(SubmissionError::StoreUnavailable(e));
        }

        info!("Vote recorded: {} from {}", record.vote, record.voter_id);
        Ok(record)
    }
}
