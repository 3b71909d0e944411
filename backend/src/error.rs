use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::{Request, Response};
use shared::error::ErrorKind;
use shared::models::SubmitResponse;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Invalid vote option: {0:?}")]
    InvalidOption(String),
    #[error("Vote store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
    #[error("Failed to encode vote: {0}")]
    Encode(String),
}

impl SubmissionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmissionError::InvalidOption(_) => ErrorKind::InvalidOption,
            SubmissionError::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
            SubmissionError::Encode(_) => ErrorKind::SystemError,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            SubmissionError::InvalidOption(_) => Status::BadRequest,
            SubmissionError::StoreUnavailable(_) => Status::ServiceUnavailable,
            SubmissionError::Encode(_) => Status::InternalServerError,
        }
    }

    /// Text safe to show to clients; store details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            SubmissionError::InvalidOption(_) => "Invalid vote option",
            SubmissionError::StoreUnavailable(_) => "Failed to record vote. Please try again.",
            SubmissionError::Encode(_) => "Vote could not be encoded.",
        }
    }

    pub fn for_voter(self, voter_token: impl Into<String>) -> RejectedVote {
        RejectedVote {
            error: self,
            voter_token: voter_token.into(),
        }
    }
}

/// A failed submission paired with the token the client must keep.
#[derive(Debug)]
pub struct RejectedVote {
    pub error: SubmissionError,
    pub voter_token: String,
}

impl<'r, 'o: 'r> Responder<'r, 'o> for RejectedVote {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        let status = self.error.status();
        let body = SubmitResponse::rejected(
            self.error.kind(),
            self.error.public_message(),
            self.voter_token,
        );

        Response::build_from(Json(body).respond_to(req)?)
            .status(status)
            .ok()
    }
}
