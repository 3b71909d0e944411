use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Tag sent to clients alongside a failed submission.
#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    #[error("Invalid vote option")]
    InvalidOption,
    #[error("Vote store temporarily unavailable")]
    StoreUnavailable,
    #[error("Internal system error")]
    SystemError,
}

impl ErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::StoreUnavailable)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, status: u16) -> Self {
        Self {
            error: error.into(),
            status,
        }
    }
}
