use thiserror::Error;

use crate::submission::{AssignmentGroupId, SubmissionId};

/// Errors raised by the data access layer.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// An input that must be a non-empty string was empty.
    #[error("the {what} must be a non-empty string")]
    InvalidArgument { what: &'static str },

    /// The local cache database is missing or unreadable. Fatal at startup.
    #[error("cache setup failed: {reason}")]
    Setup { reason: String },

    /// The remote API reported a failure (404, error payload, bad token).
    #[error("{message}")]
    Api { message: String },

    /// The request itself failed (connection, timeout, malformed body).
    #[error("request to `{endpoint}` failed")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response decoded as JSON but did not match the expected record shape.
    #[error("could not decode response from `{endpoint}`")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// A submission references an assignment group that was not fetched.
    #[error(
        "submission `{submission_id}` references unknown assignment group `{group_id}`"
    )]
    Consistency {
        submission_id: SubmissionId,
        group_id: AssignmentGroupId,
    },
}

pub type Result<T> = std::result::Result<T, CanvasError>;
