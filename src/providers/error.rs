//! Typed failures for the talk lifecycle.

use std::time::Duration;
use thiserror::Error;

/// Failure while creating a talk. Never retried automatically.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// No API key configured; nothing was sent.
    #[error("no API key is configured; set D_ID_API_KEY before generating")]
    MissingCredential,

    /// Empty script; nothing was sent.
    #[error("the script is empty; write something for the presenter to say")]
    EmptyScript,

    #[error("failed to reach the talks endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("the provider rejected the talk ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// A success response that did not carry a job id.
    #[error("talk response carried no job id: {body}")]
    MissingJobId { body: String },
}

/// Failure while waiting for a talk to finish. The wait loop aborts on the
/// first failure; the caller re-triggers the whole action.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("no API key is configured; set D_ID_API_KEY before polling")]
    MissingCredential,

    #[error("failed to query talk status: {0}")]
    Transport(#[from] reqwest::Error),

    /// The status endpoint answered with a non-success status.
    #[error("status query failed ({status}): {body}")]
    Http { status: u16, body: String },

    /// The provider reported the job itself as failed.
    #[error("the provider reported a failed job: {message}")]
    Provider { message: String },

    /// The job finished but the response carried no video URL.
    #[error("job finished but the response carried no result URL")]
    MissingResultUrl,

    /// The configured deadline elapsed before a terminal state.
    #[error("gave up waiting after {}s", .waited.as_secs())]
    Timeout { waited: Duration },

    #[error("generation was cancelled")]
    Cancelled,
}
