use crate::models::{QueuedVote, VoteOption};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid vote option: {0:?}")]
    InvalidOption(String),
    #[error("Malformed queue entry: {0}")]
    MalformedEntry(String),
}

/// Accepts exactly `"a"` or `"b"`. No trimming, no case folding.
pub fn parse_vote_option(raw: &str) -> Result<VoteOption, ValidationError> {
    raw.parse()
}

/// Decodes one raw queue entry against the strict read-side schema.
///
/// Entries that are not UTF-8, not JSON, or whose `vote` is not one of the
/// two options are reported as `MalformedEntry`; the caller decides whether
/// to skip them.
pub fn decode_queued_vote(raw: &[u8]) -> Result<QueuedVote, ValidationError> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| ValidationError::MalformedEntry(e.to_string()))?;

    serde_json::from_str::<QueuedVote>(text)
        .map_err(|e| ValidationError::MalformedEntry(e.to_string()))
}
