use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

use crate::error::ErrorKind;
use crate::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOption {
    A,
    B,
}

impl VoteOption {
    pub const ALL: [VoteOption; 2] = [VoteOption::A, VoteOption::B];

    pub const fn as_str(self) -> &'static str {
        match self {
            VoteOption::A => "a",
            VoteOption::B => "b",
        }
    }
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteOption {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(VoteOption::A),
            "b" => Ok(VoteOption::B),
            other => Err(ValidationError::InvalidOption(other.to_string())),
        }
    }
}

/// One vote as it is appended to the queue store.
///
/// Field names are the queue wire format read by the ledger worker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteRecord {
    pub voter_id: String,
    pub vote: VoteOption,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl VoteRecord {
    pub fn new(voter_id: impl Into<String>, vote: VoteOption, timestamp: OffsetDateTime) -> Self {
        Self {
            voter_id: voter_id.into(),
            vote,
            timestamp,
        }
    }

    pub fn to_payload(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Read-side view of a queue entry. Only `vote` is required.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct QueuedVote {
    pub vote: VoteOption,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TallySource {
    Ledger,
    Queue,
    Unavailable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", from = "TallyCounts")]
pub struct TallySnapshot {
    count_a: u64,
    count_b: u64,
    total: u64,
    source: TallySource,
}

impl TallySnapshot {
    pub fn new(count_a: u64, count_b: u64, source: TallySource) -> Self {
        Self {
            count_a,
            count_b,
            total: count_a + count_b,
            source,
        }
    }

    pub fn unavailable() -> Self {
        Self::new(0, 0, TallySource::Unavailable)
    }

    pub fn count_a(&self) -> u64 { self.count_a }
    pub fn count_b(&self) -> u64 { self.count_b }
    pub fn total(&self) -> u64 { self.total }
    pub fn source(&self) -> TallySource { self.source }

    pub fn count(&self, option: VoteOption) -> u64 {
        match option {
            VoteOption::A => self.count_a,
            VoteOption::B => self.count_b,
        }
    }

    /// Anything not read from the ledger is best-effort.
    pub fn is_degraded(&self) -> bool {
        self.source != TallySource::Ledger
    }
}

/// Incoming tally fields. A serialized `total` is ignored and recomputed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TallyCounts {
    count_a: u64,
    count_b: u64,
    source: TallySource,
}

impl From<TallyCounts> for TallySnapshot {
    fn from(counts: TallyCounts) -> Self {
        TallySnapshot::new(counts.count_a, counts.count_b, counts.source)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub queue_reachable: bool,
    pub ledger_reachable: bool,
}

impl HealthReport {
    pub fn all_reachable(&self) -> bool {
        self.queue_reachable && self.ledger_reachable
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub vote: Option<serde_json::Value>,
}

impl VoteRequest {
    /// The submitted option as text. Missing and null are empty, other
    /// non-string values keep their JSON rendering. Neither parses as an option.
    pub fn option_text(&self) -> String {
        match &self.vote {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote: Option<VoteOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub voter_token: String,
}

impl SubmitResponse {
    pub fn accepted(vote: VoteOption, voter_token: impl Into<String>) -> Self {
        Self {
            ok: true,
            vote: Some(vote),
            error_kind: None,
            error: None,
            voter_token: voter_token.into(),
        }
    }

    pub fn rejected(kind: ErrorKind, error: impl Into<String>, voter_token: impl Into<String>) -> Self {
        Self {
            ok: false,
            vote: None,
            error_kind: Some(kind),
            error: Some(error.into()),
            voter_token: voter_token.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionLabels {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub votes: TallySnapshot,
    pub degraded: bool,
    pub options: OptionLabels,
    pub hostname: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(flatten)]
    pub report: HealthReport,
    pub hostname: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoterResponse {
    pub voter_token: String,
}
