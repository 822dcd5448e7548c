use thiserror::Error;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// The message used when an upstream error body carries no `message` field.
pub const UPSTREAM_ERROR_FALLBACK_MESSAGE: &str = "An error occurred while processing the request.";

/// An error raised by a call to the upstream GitHub API.
///
/// Failures from both the repository listing and the branch fetches share
/// this taxonomy so that a caller can translate them uniformly into a
/// status/message pair. The error body field is always lowercase `message`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The upstream call returned a non-2xx status or failed at the
    /// transport level (in which case no status is available).
    #[error("upstream request failed with status {status:?}: {message}")]
    RequestFailed {
        /// The upstream HTTP status code, when one was received.
        status: Option<u16>,

        /// The message extracted from the upstream error body, or the
        /// fallback message.
        message: String,
    },

    /// The upstream body could not be decoded into the expected shape.
    #[error("malformed upstream response: {message}")]
    MalformedResponse {
        /// The decoding error message.
        message: String,
    },
}

impl UpstreamError {
    /// Retrieves the upstream HTTP status code, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            Self::MalformedResponse { .. } => None,
        }
    }

    /// Retrieves the best-effort error message.
    pub fn message(&self) -> &str {
        match self {
            Self::RequestFailed { message, .. } => message,
            Self::MalformedResponse { message } => message,
        }
    }
}
